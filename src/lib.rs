//! Access point side of 802.11 Wireless Network Management.
//!
//! Handles WNM-Sleep Mode and BSS Transition Management action frames of associated
//! stations, and builds the corresponding outbound frames. Frame transmission, key
//! management, the station table and timers are provided by the embedding access point
//! through the traits in [drivers].

pub mod channel;
pub mod config;
pub mod drivers;
pub mod error;
pub mod sta;
pub mod wnm;

pub use config::ApConfig;
pub use error::WnmError;
pub use wnm::{rx_wnm_action, ApContext};
