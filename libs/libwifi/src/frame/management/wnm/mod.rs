use libwifi_macros::AddressHeader;
use strum_macros::Display;

use crate::error::Error;
use crate::frame::components::*;
use crate::frame::management::ActionCategory;
use crate::frame::writer::FrameWriter;

mod bss_transition;
mod neighbor_report;
mod sleep;

pub use bss_transition::*;
pub use neighbor_report::*;
pub use sleep::*;

pub const WLAN_EID_NEIGHBOR_REPORT: u8 = 52;
pub const WLAN_EID_TFS_REQ: u8 = 91;
pub const WLAN_EID_TFS_RESP: u8 = 92;
pub const WLAN_EID_WNMSLEEP: u8 = 93;

/// Upper bound for the TFS element span exchanged with the driver.
pub const MAX_TFS_IE_LEN: usize = 1024;

/// The WNM action codes handled by this library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum WnmActionCode {
    BssTransitionMgmtQuery,
    BssTransitionMgmtRequest,
    BssTransitionMgmtResponse,
    SleepModeRequest,
    SleepModeResponse,
    Unknown(u8),
}

impl From<u8> for WnmActionCode {
    fn from(value: u8) -> Self {
        match value {
            6 => WnmActionCode::BssTransitionMgmtQuery,
            7 => WnmActionCode::BssTransitionMgmtRequest,
            8 => WnmActionCode::BssTransitionMgmtResponse,
            16 => WnmActionCode::SleepModeRequest,
            17 => WnmActionCode::SleepModeResponse,
            _ => WnmActionCode::Unknown(value),
        }
    }
}

impl From<WnmActionCode> for u8 {
    fn from(code: WnmActionCode) -> Self {
        match code {
            WnmActionCode::BssTransitionMgmtQuery => 6,
            WnmActionCode::BssTransitionMgmtRequest => 7,
            WnmActionCode::BssTransitionMgmtResponse => 8,
            WnmActionCode::SleepModeRequest => 16,
            WnmActionCode::SleepModeResponse => 17,
            WnmActionCode::Unknown(value) => value,
        }
    }
}

/// Everything that follows the category and action code of a WNM action frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WnmBody {
    SleepModeRequest(SleepModeRequest),
    SleepModeResponse(SleepModeResponse),
    BssTmQuery(BssTmQuery),
    BssTmRequest(BssTmRequest),
    BssTmResponse(BssTmResponse),
}

impl WnmBody {
    pub fn action_code(&self) -> WnmActionCode {
        match self {
            WnmBody::SleepModeRequest(_) => WnmActionCode::SleepModeRequest,
            WnmBody::SleepModeResponse(_) => WnmActionCode::SleepModeResponse,
            WnmBody::BssTmQuery(_) => WnmActionCode::BssTransitionMgmtQuery,
            WnmBody::BssTmRequest(_) => WnmActionCode::BssTransitionMgmtRequest,
            WnmBody::BssTmResponse(_) => WnmActionCode::BssTransitionMgmtResponse,
        }
    }

    pub fn dialog_token(&self) -> u8 {
        match self {
            WnmBody::SleepModeRequest(body) => body.dialog_token,
            WnmBody::SleepModeResponse(body) => body.dialog_token,
            WnmBody::BssTmQuery(body) => body.dialog_token,
            WnmBody::BssTmRequest(body) => body.dialog_token,
            WnmBody::BssTmResponse(body) => body.dialog_token,
        }
    }

    pub fn encoded_len(&self) -> usize {
        match self {
            WnmBody::SleepModeRequest(body) => body.encoded_len(),
            WnmBody::SleepModeResponse(body) => body.encoded_len(),
            WnmBody::BssTmQuery(body) => body.encoded_len(),
            WnmBody::BssTmRequest(body) => body.encoded_len(),
            WnmBody::BssTmResponse(body) => body.encoded_len(),
        }
    }

    pub fn write(&self, writer: &mut FrameWriter) -> Result<(), Error> {
        match self {
            WnmBody::SleepModeRequest(body) => body.write(writer),
            WnmBody::SleepModeResponse(body) => body.write(writer),
            WnmBody::BssTmQuery(body) => body.write(writer),
            WnmBody::BssTmRequest(body) => body.write(writer),
            WnmBody::BssTmResponse(body) => body.write(writer),
        }
    }
}

/// A management action frame of the WNM category (10).
///
/// Layout on the wire:
/// - 24 bytes management header
/// - 1 byte category (always 10)
/// - 1 byte WNM action code
/// - The body of the specific action
#[derive(Clone, Debug, AddressHeader)]
pub struct WnmAction {
    pub header: ManagementHeader,
    pub body: WnmBody,
}

impl WnmAction {
    pub fn new(header: ManagementHeader, body: WnmBody) -> Self {
        WnmAction { header, body }
    }

    pub fn action_code(&self) -> WnmActionCode {
        self.body.action_code()
    }

    /// Length of everything after the management header.
    pub fn payload_len(&self) -> usize {
        2 + self.body.encoded_len()
    }

    pub fn encoded_len(&self) -> usize {
        MANAGEMENT_HEADER_LEN + self.payload_len()
    }

    /// Encode the full frame, header included, into a buffer of exactly the required size.
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        self.encode_with_limit(self.encoded_len())
    }

    /// Encode the full frame into a buffer that may never grow past `limit` bytes.
    pub fn encode_with_limit(&self, limit: usize) -> Result<Vec<u8>, Error> {
        let mut writer = FrameWriter::with_limit(limit);
        writer.put_bytes(&self.header.encode())?;
        self.write_payload(&mut writer)?;

        Ok(writer.into_inner())
    }

    /// Encode the action payload without the management header.
    /// This is what drivers expect for their `send_action` style interfaces.
    pub fn encode_payload(&self) -> Result<Vec<u8>, Error> {
        let mut writer = FrameWriter::with_limit(self.payload_len());
        self.write_payload(&mut writer)?;

        Ok(writer.into_inner())
    }

    fn write_payload(&self, writer: &mut FrameWriter) -> Result<(), Error> {
        writer.put_u8(ActionCategory::Wnm.into())?;
        writer.put_u8(self.action_code().into())?;
        self.body.write(writer)
    }
}
