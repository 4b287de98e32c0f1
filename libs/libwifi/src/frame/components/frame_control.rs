use crate::frame_types::*;

#[inline]
/// Mini helper to check, whether a bit is set or not.
fn flag_is_set(data: u8, bit: u8) -> bool {
    if bit == 0 {
        let mask = 1;
        (data & mask) > 0
    } else {
        let mask = 1 << bit;
        (data & mask) > 0
    }
}

/// The very first two bytes of every frame contain the FrameControl header.
///
/// First byte:
///
/// - **bit_0-1**: Protocol version.
///     Until now, this has always been 0 and is expected to be 0.
/// - **bit_2-3**: [FrameType]
/// - **bit_4-7**: [FrameSubType]
///
/// Second byte (Flags):
/// - **bit_0** `to_ds`
/// - **bit_1** `from_ds`
/// - **bit_2** `more_frag`
/// - **bit_3** `retry`
/// - **bit_4** `power_mgmt`: The power mode the station will be in once the frame has been sent.
/// - **bit_5** `more_data`
/// - **bit_6** `protected`: Set if the frame body is encrypted (robust action frames under MFP).
/// - **bit_7** `order`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameControl {
    pub protocol_version: u8,
    pub frame_type: FrameType,
    pub frame_subtype: FrameSubType,
    pub flags: u8,
}

impl FrameControl {
    /// Frame control of a plain management action frame (`0xd0 0x00` on the wire).
    pub fn action() -> Self {
        FrameControl {
            protocol_version: 0,
            frame_type: FrameType::Management,
            frame_subtype: FrameSubType::Action,
            flags: 0,
        }
    }

    pub fn to_ds(&self) -> bool {
        flag_is_set(self.flags, 0)
    }

    pub fn from_ds(&self) -> bool {
        flag_is_set(self.flags, 1)
    }

    pub fn retry(&self) -> bool {
        flag_is_set(self.flags, 3)
    }

    pub fn pwr_mgmt(&self) -> bool {
        flag_is_set(self.flags, 4)
    }

    pub fn protected(&self) -> bool {
        flag_is_set(self.flags, 6)
    }

    pub fn encode(&self) -> [u8; 2] {
        let protocol_version_bits = self.protocol_version & 0b11; // 2 bits
        let frame_type_bits = (self.frame_type as u8 & 0b11) << 2; // 2 bits
        let frame_subtype_bits = (self.frame_subtype.to_bytes() & 0b1111) << 4; // 4 bits

        let first_byte = frame_subtype_bits | frame_type_bits | protocol_version_bits;

        [first_byte, self.flags]
    }
}
