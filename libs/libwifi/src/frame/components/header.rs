use super::{FrameControl, MacAddress, SequenceControl};
use crate::traits::Addresses;

/// Length of a management header on the wire.
pub const MANAGEMENT_HEADER_LEN: usize = 24;

/// Representation of a management frame header. This format is used by all management frames!
///
/// This struct implements the `Addresses` trait, which provides the `src`, `dest` and `bssid`
/// functions.
///
/// Structure of a management header:
///
/// **Bytes 0-1** \
/// These contain protocol meta information and flags.
/// Take a look at the [FrameControl] struct for more information.
///
/// **Bytes 2-3** \
/// Those are the duration bytes. These are always present!
///
/// **Bytes 4-23** \
/// byte 4-9: Address 1 (destination).
/// byte 10-15: Address 2 (source).
/// byte 16-21: Address 3 (BSSID).
/// byte 22-23: Sequence Control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManagementHeader {
    pub frame_control: FrameControl,
    pub duration: [u8; 2],
    pub address_1: MacAddress,
    pub address_2: MacAddress,
    pub address_3: MacAddress,
    pub sequence_control: SequenceControl,
}

impl ManagementHeader {
    /// Header for an action frame sent by an access point.
    /// The AP's own address is used as both source and BSSID.
    pub fn action(destination: MacAddress, own_addr: MacAddress) -> Self {
        ManagementHeader {
            frame_control: FrameControl::action(),
            duration: [0, 0],
            address_1: destination,
            address_2: own_addr,
            address_3: own_addr,
            sequence_control: SequenceControl::default(),
        }
    }

    pub fn encode(&self) -> [u8; MANAGEMENT_HEADER_LEN] {
        let mut bytes = [0u8; MANAGEMENT_HEADER_LEN];
        bytes[0..2].copy_from_slice(&self.frame_control.encode());
        bytes[2..4].copy_from_slice(&self.duration);
        bytes[4..10].copy_from_slice(&self.address_1.encode());
        bytes[10..16].copy_from_slice(&self.address_2.encode());
        bytes[16..22].copy_from_slice(&self.address_3.encode());
        bytes[22..24].copy_from_slice(&self.sequence_control.encode());

        bytes
    }
}

/// Management frames never travel through the distribution system,
/// so the address roles are fixed:
///
/// **Address 1:** \
/// The recipient station address.
///
/// **Address 2:** \
/// The transmitter station address.
///
/// **Address 3:** \
/// The BSSID.
impl Addresses for ManagementHeader {
    fn src(&self) -> Option<&MacAddress> {
        Some(&self.address_2)
    }

    /// A full `ff:ff:..` usually indicates a undirected broadcast.
    fn dest(&self) -> &MacAddress {
        &self.address_1
    }

    fn bssid(&self) -> Option<&MacAddress> {
        Some(&self.address_3)
    }
}
