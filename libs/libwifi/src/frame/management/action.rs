use libwifi_macros::AddressHeader;
use strum_macros::Display;

use crate::frame::components::*;

/// An action frame this library has no typed representation for.
/// The body after the category and action code is kept verbatim.
#[derive(Clone, Debug, AddressHeader)]
pub struct Action {
    pub header: ManagementHeader,
    pub category: ActionCategory,
    pub action: u8,
    pub body: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum ActionCategory {
    SpectrumManagement,
    Qos,
    BlockAck,
    Public,
    RadioMeasurement,
    FastBssTransition,
    HighThroughput,
    SaQuery,
    ProtectedDualOfPublicAction,
    Wnm,
    UnprotectedWnm,
    Tdls,
    Mesh,
    Multihop,
    SelfProtected,
    Dmg,
    FastSessionTransfer,
    RobustAvStreaming,
    UnprotectedDmg,
    Vht,
    VendorSpecificProtected,
    VendorSpecific,
    Reserved(u8),
    /// Category values with the high bit set are returned by a peer to signal an error.
    Error(u8),
}

impl From<u8> for ActionCategory {
    fn from(value: u8) -> Self {
        match value {
            0 => ActionCategory::SpectrumManagement,
            1 => ActionCategory::Qos,
            3 => ActionCategory::BlockAck,
            4 => ActionCategory::Public,
            5 => ActionCategory::RadioMeasurement,
            6 => ActionCategory::FastBssTransition,
            7 => ActionCategory::HighThroughput,
            8 => ActionCategory::SaQuery,
            9 => ActionCategory::ProtectedDualOfPublicAction,
            10 => ActionCategory::Wnm,
            11 => ActionCategory::UnprotectedWnm,
            12 => ActionCategory::Tdls,
            13 => ActionCategory::Mesh,
            14 => ActionCategory::Multihop,
            15 => ActionCategory::SelfProtected,
            16 => ActionCategory::Dmg,
            18 => ActionCategory::FastSessionTransfer,
            19 => ActionCategory::RobustAvStreaming,
            20 => ActionCategory::UnprotectedDmg,
            21 => ActionCategory::Vht,
            126 => ActionCategory::VendorSpecificProtected,
            127 => ActionCategory::VendorSpecific,
            128..=255 => ActionCategory::Error(value),
            _ => ActionCategory::Reserved(value),
        }
    }
}

impl From<ActionCategory> for u8 {
    fn from(category: ActionCategory) -> Self {
        match category {
            ActionCategory::SpectrumManagement => 0,
            ActionCategory::Qos => 1,
            ActionCategory::BlockAck => 3,
            ActionCategory::Public => 4,
            ActionCategory::RadioMeasurement => 5,
            ActionCategory::FastBssTransition => 6,
            ActionCategory::HighThroughput => 7,
            ActionCategory::SaQuery => 8,
            ActionCategory::ProtectedDualOfPublicAction => 9,
            ActionCategory::Wnm => 10,
            ActionCategory::UnprotectedWnm => 11,
            ActionCategory::Tdls => 12,
            ActionCategory::Mesh => 13,
            ActionCategory::Multihop => 14,
            ActionCategory::SelfProtected => 15,
            ActionCategory::Dmg => 16,
            ActionCategory::FastSessionTransfer => 18,
            ActionCategory::RobustAvStreaming => 19,
            ActionCategory::UnprotectedDmg => 20,
            ActionCategory::Vht => 21,
            ActionCategory::VendorSpecificProtected => 126,
            ActionCategory::VendorSpecific => 127,
            ActionCategory::Reserved(value) | ActionCategory::Error(value) => value,
        }
    }
}
