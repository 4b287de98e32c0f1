use derive_setters::Setters;
use libwifi::frame::components::MacAddress;

use crate::channel::{operating_class, VhtChannelWidth, WiFiChannel};

/// Beacon interval used whenever the configured one is unusable.
pub const DEFAULT_BEACON_INT: u16 = 100;

/// The parts of the access point configuration the WNM engine needs.
///
/// ```
/// use wnm_ap::ApConfig;
///
/// let config = ApConfig::default().freq(5180u32).beacon_int(0u16);
/// assert_eq!(config.beacon_interval(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Setters)]
pub struct ApConfig {
    /// Our own address, used as source address and BSSID of every frame we send.
    #[setters(into)]
    pub own_addr: MacAddress,
    /// Operating frequency in MHz.
    pub freq: u32,
    /// Beacon interval in TU.
    pub beacon_int: u16,
    /// HT40 secondary channel offset: 1 (above), -1 (below) or 0.
    pub secondary_channel: i8,
    pub vht_oper_chwidth: VhtChannelWidth,
}

impl Default for ApConfig {
    fn default() -> Self {
        ApConfig {
            own_addr: MacAddress::zeroed(),
            freq: 2437,
            beacon_int: DEFAULT_BEACON_INT,
            secondary_channel: 0,
            vht_oper_chwidth: VhtChannelWidth::default(),
        }
    }
}

impl ApConfig {
    /// The beacon interval in TU, falling back to 100 if the configured value is < 1.
    pub fn beacon_interval(&self) -> u32 {
        if self.beacon_int < 1 {
            DEFAULT_BEACON_INT as u32
        } else {
            self.beacon_int as u32
        }
    }

    pub fn channel(&self) -> Option<WiFiChannel> {
        WiFiChannel::from_frequency(self.freq)
    }

    /// Operating class of our own channel, 0 if there is none.
    pub fn operating_class(&self) -> u8 {
        operating_class(self.freq, self.secondary_channel, self.vht_oper_chwidth).unwrap_or(0)
    }
}
