use std::fmt;

use strum_macros::{Display, EnumString};

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum WiFiBand {
    Band2GHz,
    Band5GHz,
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum WiFiChannel {
    Channel2GHz(u8),
    /// 5 GHz channels, including the 4.9 GHz public safety band (channels 180 and up).
    Channel5GHz(u8),
}

impl fmt::Display for WiFiChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WiFiChannel::Channel2GHz(channel) => write!(f, "2.4GHz {}", channel),
            WiFiChannel::Channel5GHz(channel) => write!(f, "5GHz {}", channel),
        }
    }
}

impl WiFiChannel {
    pub fn number(&self) -> u8 {
        match self {
            WiFiChannel::Channel2GHz(channel) | WiFiChannel::Channel5GHz(channel) => *channel,
        }
    }

    pub fn band(&self) -> WiFiBand {
        match self {
            WiFiChannel::Channel2GHz(_) => WiFiBand::Band2GHz,
            WiFiChannel::Channel5GHz(_) => WiFiBand::Band5GHz,
        }
    }

    pub fn to_frequency(&self) -> Option<u32> {
        match self {
            WiFiChannel::Channel2GHz(channel) => match channel {
                1..=13 => Some(2407 + (*channel as u32) * 5),
                14 => Some(2484), // Typically Japan only
                _ => None,
            },
            WiFiChannel::Channel5GHz(channel) => match channel {
                180..=199 => Some(4000 + (*channel as u32) * 5),
                _ => Some(5000 + (*channel as u32) * 5),
            },
        }
    }

    /// Map a center frequency in MHz to its channel.
    /// Frequencies that aren't on the 5 MHz channel raster yield `None`.
    pub fn from_frequency(frequency: u32) -> Option<WiFiChannel> {
        match frequency {
            2412..=2472 if (frequency - 2407) % 5 == 0 => {
                Some(WiFiChannel::Channel2GHz(((frequency - 2407) / 5) as u8))
            }
            2484 => Some(WiFiChannel::Channel2GHz(14)),
            4900..=4999 if (frequency - 4000) % 5 == 0 => {
                Some(WiFiChannel::Channel5GHz(((frequency - 4000) / 5) as u8))
            }
            5000..=5895 if (frequency - 5000) % 5 == 0 => {
                Some(WiFiChannel::Channel5GHz(((frequency - 5000) / 5) as u8))
            }
            _ => None,
        }
    }
}

/// The VHT operating channel width of the access point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum VhtChannelWidth {
    /// 20 or 40 MHz, the width is then given by the secondary channel offset.
    #[default]
    #[strum(to_string = "20or40", serialize = "20", serialize = "40")]
    Use20Or40,
    #[strum(serialize = "80")]
    Use80,
    #[strum(serialize = "160")]
    Use160,
    #[strum(serialize = "80+80")]
    Use80P80,
}

impl VhtChannelWidth {
    fn operating_class(&self) -> Option<u8> {
        match self {
            VhtChannelWidth::Use20Or40 => None,
            VhtChannelWidth::Use80 => Some(128),
            VhtChannelWidth::Use160 => Some(129),
            VhtChannelWidth::Use80P80 => Some(130),
        }
    }
}

/// Derive the global operating class (802.11 Annex E) of a frequency.
///
/// `secondary_channel` is the HT40 secondary channel offset: 1 (above), -1 (below) or 0.
/// Returns `None` for frequencies or combinations without an operating class.
pub fn operating_class(
    frequency: u32,
    secondary_channel: i8,
    vht_width: VhtChannelWidth,
) -> Option<u8> {
    if !(-1..=1).contains(&secondary_channel) {
        return None;
    }
    let channel = WiFiChannel::from_frequency(frequency)?;
    let ht40 = |above: u8, below: u8, plain: u8| match secondary_channel {
        1 => above,
        -1 => below,
        _ => plain,
    };

    if channel.band() == WiFiBand::Band2GHz {
        if vht_width != VhtChannelWidth::Use20Or40 {
            return None;
        }
        if channel.number() == 14 {
            return (secondary_channel == 0).then_some(82);
        }
        return Some(ht40(83, 84, 81));
    }

    // The 4.9 GHz band has no global operating class.
    if (4900..5000).contains(&frequency) {
        return Some(0);
    }

    let class = match frequency {
        // Channels 36..48
        5180..=5240 => ht40(116, 117, 115),
        // Channels 52..64
        5260..=5320 => ht40(119, 120, 118),
        // Channels 149..165
        5745..=5845 => match secondary_channel {
            1 => 126,
            -1 => 127,
            _ if frequency <= 5805 => 124,
            _ => 125,
        },
        // Channels 100..140
        5000..=5700 => ht40(122, 123, 121),
        _ => return None,
    };

    Some(vht_width.operating_class().unwrap_or(class))
}
