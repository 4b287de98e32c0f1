mod action;
/// WNM action frames: sleep mode and BSS transition management.
mod wnm;

pub use action::{Action, ActionCategory};
pub use wnm::*;
