use strum_macros::Display;

use super::WLAN_EID_WNMSLEEP;
use crate::error::Error;
use crate::frame::writer::FrameWriter;

/// Size of an encoded WNM-Sleep Mode element, including its two byte element header.
pub const WNM_SLEEP_ELEMENT_LEN: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum SleepActionType {
    Enter,
    Exit,
    Unknown(u8),
}

impl From<u8> for SleepActionType {
    fn from(value: u8) -> Self {
        match value {
            0 => SleepActionType::Enter,
            1 => SleepActionType::Exit,
            _ => SleepActionType::Unknown(value),
        }
    }
}

impl From<SleepActionType> for u8 {
    fn from(action_type: SleepActionType) -> Self {
        match action_type {
            SleepActionType::Enter => 0,
            SleepActionType::Exit => 1,
            SleepActionType::Unknown(value) => value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum WnmSleepStatus {
    Accept,
    ExitAcceptGtkUpdate,
    DeniedAction,
    DeniedTemporary,
    DeniedKey,
    DeniedOtherWnmService,
    Unknown(u8),
}

impl WnmSleepStatus {
    /// Both accept flavours allow a station to leave sleep mode.
    pub fn is_exit_accept(&self) -> bool {
        matches!(
            self,
            WnmSleepStatus::Accept | WnmSleepStatus::ExitAcceptGtkUpdate
        )
    }
}

impl From<u8> for WnmSleepStatus {
    fn from(value: u8) -> Self {
        match value {
            0 => WnmSleepStatus::Accept,
            1 => WnmSleepStatus::ExitAcceptGtkUpdate,
            2 => WnmSleepStatus::DeniedAction,
            3 => WnmSleepStatus::DeniedTemporary,
            4 => WnmSleepStatus::DeniedKey,
            5 => WnmSleepStatus::DeniedOtherWnmService,
            _ => WnmSleepStatus::Unknown(value),
        }
    }
}

impl From<WnmSleepStatus> for u8 {
    fn from(status: WnmSleepStatus) -> Self {
        match status {
            WnmSleepStatus::Accept => 0,
            WnmSleepStatus::ExitAcceptGtkUpdate => 1,
            WnmSleepStatus::DeniedAction => 2,
            WnmSleepStatus::DeniedTemporary => 3,
            WnmSleepStatus::DeniedKey => 4,
            WnmSleepStatus::DeniedOtherWnmService => 5,
            WnmSleepStatus::Unknown(value) => value,
        }
    }
}

/// The WNM-Sleep Mode element.
///
/// - 1 byte: Element id (93)
/// - 1 byte: Length (always 4)
/// - 1 byte: Action type
/// - 1 byte: Status
/// - 2 bytes: WNM-Sleep interval (little endian)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WnmSleepElement {
    pub action_type: SleepActionType,
    pub status: WnmSleepStatus,
    pub interval: u16,
}

impl WnmSleepElement {
    pub fn encode(&self) -> [u8; WNM_SLEEP_ELEMENT_LEN] {
        let interval = self.interval.to_le_bytes();
        [
            WLAN_EID_WNMSLEEP,
            (WNM_SLEEP_ELEMENT_LEN - 2) as u8,
            self.action_type.into(),
            self.status.into(),
            interval[0],
            interval[1],
        ]
    }
}

/// WNM-Sleep Mode Request body.
///
/// The general structure is:
/// - Dialog token
/// - WNM-Sleep Mode element
/// - Zero or more TFS Request elements
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SleepModeRequest {
    pub dialog_token: u8,
    /// `None` if the peer didn't send a (usable) WNM-Sleep Mode element.
    pub sleep: Option<WnmSleepElement>,
    /// The raw TFS Request element span, empty if none were present.
    pub tfs_request: Vec<u8>,
}

impl SleepModeRequest {
    pub fn encoded_len(&self) -> usize {
        let sleep_len = self.sleep.map_or(0, |_| WNM_SLEEP_ELEMENT_LEN);
        1 + sleep_len + self.tfs_request.len()
    }

    pub fn write(&self, writer: &mut FrameWriter) -> Result<(), Error> {
        writer.put_u8(self.dialog_token)?;
        if let Some(sleep) = &self.sleep {
            writer.put_bytes(&sleep.encode())?;
        }
        writer.put_bytes(&self.tfs_request)
    }
}

/// WNM-Sleep Mode Response body.
///
/// The general structure is:
/// - Dialog token
/// - Key data length (2 bytes, little endian)
/// - Key data (GTK and IGTK subelements)
/// - WNM-Sleep Mode element
/// - TFS Response elements (optional)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SleepModeResponse {
    pub dialog_token: u8,
    pub key_data: Vec<u8>,
    pub sleep: WnmSleepElement,
    pub tfs_response: Vec<u8>,
}

impl SleepModeResponse {
    pub fn key_data_len(&self) -> usize {
        self.key_data.len()
    }

    pub fn encoded_len(&self) -> usize {
        1 + 2 + self.key_data.len() + WNM_SLEEP_ELEMENT_LEN + self.tfs_response.len()
    }

    pub fn write(&self, writer: &mut FrameWriter) -> Result<(), Error> {
        let key_data_len = u16::try_from(self.key_data.len()).map_err(|_| {
            Error::ElementTooLong {
                id: WLAN_EID_WNMSLEEP,
                len: self.key_data.len(),
            }
        })?;

        writer.put_u8(self.dialog_token)?;
        writer.put_u16(key_data_len)?;
        writer.put_bytes(&self.key_data)?;
        writer.put_bytes(&self.sleep.encode())?;
        writer.put_bytes(&self.tfs_response)
    }
}
