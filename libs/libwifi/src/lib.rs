/// Libwifi's own [Error](error::Error) implementation
pub mod error;
/// The [Frame](frame::Frame) enum and all frame structs.
pub mod frame;
/// Enums representing frame types and frame subtypes.
mod frame_types;
/// [nom] parsers for frames, their bodies and information elements.
pub mod parsers;
/// All traits used or provided by this library.
mod traits;

use crate::error::Error;
use crate::parsers::*;

// Re-exports for user convenience
pub use crate::frame::Frame;
pub use crate::frame_types::*;
pub use crate::traits::*;

use crc::{Crc, CRC_32_ISO_HDLC};

/// Length of the frame check sequence some capture sources append.
pub const FCS_LEN: usize = 4;

// CRC algorithm for FCS calculation
const CRC_32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Compute the frame check sequence for the given frame bytes.
pub fn frame_check_sequence(frame: &[u8]) -> u32 {
    CRC_32.checksum(frame)
}

/// Parse IEEE 802.11 action frames from raw bytes.
///
/// If `fcs_included` is set, the trailing 4 byte FCS is verified and stripped first.
pub fn parse_frame(input: &[u8], fcs_included: bool) -> Result<Frame, Error> {
    let input = if fcs_included {
        if input.len() < FCS_LEN {
            return Err(Error::Incomplete(format!(
                "At least {FCS_LEN} bytes are needed for the FCS"
            )));
        }

        // Split the input into frame data and FCS
        let (frame_data, fcs_bytes) = input.split_at(input.len() - FCS_LEN);

        let crc = frame_check_sequence(frame_data);
        // The FCS is transmitted in little endian.
        let fcs = u32::from_le_bytes(clone_slice::<FCS_LEN>(fcs_bytes));

        if crc != fcs {
            return Err(Error::Failure(
                format!("(FCS) mismatch {:08x} {:08x}", crc, fcs),
                input.to_vec(),
            ));
        }

        frame_data
    } else {
        input
    };

    let (input, frame_control) = parse_frame_control(input)?;

    // Check which kind of frame sub-type we got
    match frame_control.frame_subtype {
        FrameSubType::Action | FrameSubType::ActionNoAck => parse_action(frame_control, input),
        _ => Err(Error::UnhandledFrameSubtype(frame_control, input.to_vec())),
    }
}
