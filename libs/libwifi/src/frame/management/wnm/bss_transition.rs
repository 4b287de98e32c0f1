use std::ops::BitOr;

use strum_macros::Display;

use crate::error::Error;
use crate::frame::components::*;
use crate::frame::writer::FrameWriter;

/// Length of the optional BSS Termination Duration subelement.
pub const BSS_TERMINATION_DURATION_LEN: usize = 12;

/// The request mode bitfield of a BSS Transition Management Request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RequestMode(pub u8);

impl RequestMode {
    pub const PREFERRED_CANDIDATE_LIST: RequestMode = RequestMode(0x01);
    pub const ABRIDGED: RequestMode = RequestMode(0x02);
    pub const DISASSOC_IMMINENT: RequestMode = RequestMode(0x04);
    pub const BSS_TERMINATION_INCLUDED: RequestMode = RequestMode(0x08);
    pub const ESS_DISASSOC_IMMINENT: RequestMode = RequestMode(0x10);

    pub fn empty() -> Self {
        RequestMode(0)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn contains(&self, other: RequestMode) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for RequestMode {
    type Output = RequestMode;

    fn bitor(self, rhs: RequestMode) -> RequestMode {
        RequestMode(self.0 | rhs.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum BssTmStatus {
    Accept,
    RejectUnspecified,
    RejectInsufficientBeacon,
    RejectInsufficientCapability,
    RejectUndesired,
    RejectDelayRequest,
    RejectStaCandidateListProvided,
    RejectNoSuitableCandidates,
    RejectLeavingEss,
    Unknown(u8),
}

impl From<u8> for BssTmStatus {
    fn from(value: u8) -> Self {
        match value {
            0 => BssTmStatus::Accept,
            1 => BssTmStatus::RejectUnspecified,
            2 => BssTmStatus::RejectInsufficientBeacon,
            3 => BssTmStatus::RejectInsufficientCapability,
            4 => BssTmStatus::RejectUndesired,
            5 => BssTmStatus::RejectDelayRequest,
            6 => BssTmStatus::RejectStaCandidateListProvided,
            7 => BssTmStatus::RejectNoSuitableCandidates,
            8 => BssTmStatus::RejectLeavingEss,
            _ => BssTmStatus::Unknown(value),
        }
    }
}

impl From<BssTmStatus> for u8 {
    fn from(status: BssTmStatus) -> Self {
        match status {
            BssTmStatus::Accept => 0,
            BssTmStatus::RejectUnspecified => 1,
            BssTmStatus::RejectInsufficientBeacon => 2,
            BssTmStatus::RejectInsufficientCapability => 3,
            BssTmStatus::RejectUndesired => 4,
            BssTmStatus::RejectDelayRequest => 5,
            BssTmStatus::RejectStaCandidateListProvided => 6,
            BssTmStatus::RejectNoSuitableCandidates => 7,
            BssTmStatus::RejectLeavingEss => 8,
            BssTmStatus::Unknown(value) => value,
        }
    }
}

/// BSS Transition Management Query, sent by a station that wants to roam.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BssTmQuery {
    pub dialog_token: u8,
    pub reason: u8,
    /// Raw neighbor report elements the station considers candidates.
    pub candidate_list: Vec<u8>,
}

impl BssTmQuery {
    pub fn encoded_len(&self) -> usize {
        2 + self.candidate_list.len()
    }

    pub fn write(&self, writer: &mut FrameWriter) -> Result<(), Error> {
        writer.put_u8(self.dialog_token)?;
        writer.put_u8(self.reason)?;
        writer.put_bytes(&self.candidate_list)
    }
}

/// BSS Transition Management Request.
///
/// The general structure is:
/// - Dialog token
/// - Request mode
/// - Disassociation timer (2 bytes, beacon intervals)
/// - Validity interval
/// - BSS Termination Duration (12 bytes, only with [RequestMode::BSS_TERMINATION_INCLUDED])
/// - Session information URL (1 byte length + url)
/// - BSS transition candidate list (neighbor report elements)
///
/// Receivers only read the URL with [RequestMode::ESS_DISASSOC_IMMINENT] set, so that bit
/// is always written whenever `session_info_url` is present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BssTmRequest {
    pub dialog_token: u8,
    pub request_mode: RequestMode,
    pub disassoc_timer: u16,
    pub validity_interval: u8,
    pub bss_termination_duration: Option<[u8; BSS_TERMINATION_DURATION_LEN]>,
    pub session_info_url: Option<String>,
    pub candidate_list: Vec<u8>,
}

impl BssTmRequest {
    fn writes_termination_duration(&self) -> bool {
        self.bss_termination_duration.is_some()
            && self
                .request_mode
                .contains(RequestMode::BSS_TERMINATION_INCLUDED)
    }

    /// The request mode as it goes on the wire.
    pub fn wire_request_mode(&self) -> RequestMode {
        match self.session_info_url {
            Some(_) => self.request_mode | RequestMode::ESS_DISASSOC_IMMINENT,
            None => self.request_mode,
        }
    }

    pub fn encoded_len(&self) -> usize {
        let mut len = 5;
        if self.writes_termination_duration() {
            len += BSS_TERMINATION_DURATION_LEN;
        }
        if let Some(url) = &self.session_info_url {
            len += 1 + url.len();
        }

        len + self.candidate_list.len()
    }

    pub fn write(&self, writer: &mut FrameWriter) -> Result<(), Error> {
        writer.put_u8(self.dialog_token)?;
        writer.put_u8(self.wire_request_mode().bits())?;
        writer.put_u16(self.disassoc_timer)?;
        writer.put_u8(self.validity_interval)?;

        if let Some(duration) = &self.bss_termination_duration {
            if self.writes_termination_duration() {
                writer.put_bytes(duration)?;
            }
        }

        if let Some(url) = &self.session_info_url {
            // The URL field has no element id, 0 is only used for error reporting.
            writer.put_length_prefixed(0, url.as_bytes())?;
        }

        writer.put_bytes(&self.candidate_list)
    }
}

/// BSS Transition Management Response, sent by a station as answer to a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BssTmResponse {
    pub dialog_token: u8,
    pub status: BssTmStatus,
    pub bss_termination_delay: u8,
    /// Only present if the station accepted the transition.
    pub target_bssid: Option<MacAddress>,
    pub candidate_list: Vec<u8>,
}

impl BssTmResponse {
    pub fn encoded_len(&self) -> usize {
        let bssid_len = self.target_bssid.map_or(0, |_| ETH_ALEN);
        3 + bssid_len + self.candidate_list.len()
    }

    pub fn write(&self, writer: &mut FrameWriter) -> Result<(), Error> {
        writer.put_u8(self.dialog_token)?;
        writer.put_u8(self.status.into())?;
        writer.put_u8(self.bss_termination_delay)?;
        if let Some(bssid) = &self.target_bssid {
            writer.put_mac(bssid)?;
        }
        writer.put_bytes(&self.candidate_list)
    }
}
