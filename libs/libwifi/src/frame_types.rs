use strum_macros::Display;

/// Enum with all frame types.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display)]
pub enum FrameType {
    Management = 0,
    Control = 1,
    Data = 2,
    Unknown = 3,
}

/// Enum with the frame subtypes this library cares about.
///
/// Only management subtypes are distinguished, everything under a control or data
/// frame type collapses into [FrameSubType::Unhandled].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display)]
pub enum FrameSubType {
    AssociationRequest,
    AssociationResponse,
    ReassociationRequest,
    ReassociationResponse,
    ProbeRequest,
    ProbeResponse,
    TimingAdvertisement,
    Beacon,
    Atim,
    Disassociation,
    Authentication,
    Deauthentication,
    Action,
    ActionNoAck,

    // Special subtypes
    Reserved,
    Unhandled,
}

impl FrameSubType {
    /// The 4 bit subtype value as it's written into the frame control field.
    pub fn to_bytes(&self) -> u8 {
        match self {
            FrameSubType::AssociationRequest => 0,
            FrameSubType::AssociationResponse => 1,
            FrameSubType::ReassociationRequest => 2,
            FrameSubType::ReassociationResponse => 3,
            FrameSubType::ProbeRequest => 4,
            FrameSubType::ProbeResponse => 5,
            FrameSubType::TimingAdvertisement => 6,
            FrameSubType::Beacon => 8,
            FrameSubType::Atim => 9,
            FrameSubType::Disassociation => 10,
            FrameSubType::Authentication => 11,
            FrameSubType::Deauthentication => 12,
            FrameSubType::Action => 13,
            FrameSubType::ActionNoAck => 14,
            FrameSubType::Reserved | FrameSubType::Unhandled => 15,
        }
    }

    pub fn is_action(&self) -> bool {
        matches!(self, FrameSubType::Action | FrameSubType::ActionNoAck)
    }
}
