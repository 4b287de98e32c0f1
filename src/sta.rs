use libwifi::frame::components::MacAddress;
use strum_macros::Display;

/// What the station timer does the next time it fires.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display)]
pub enum TimeoutAction {
    #[default]
    NoAction,
    Deauth,
    /// Disassociation requested by the operator, e.g. after a BSS transition request.
    DisassocFromCli,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SleepState {
    Awake,
    Sleeping,
}

/// The WNM relevant part of an associated station.
/// Stations are owned by the station table, this engine only flips their flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub addr: MacAddress,
    pub associated: bool,
    pub wnm_sleep: bool,
    pub timeout_next: TimeoutAction,
}

impl Station {
    /// A freshly associated, awake station.
    pub fn new(addr: MacAddress) -> Self {
        Station {
            addr,
            associated: true,
            wnm_sleep: false,
            timeout_next: TimeoutAction::NoAction,
        }
    }

    pub fn sleep_state(&self) -> SleepState {
        if self.wnm_sleep {
            SleepState::Sleeping
        } else {
            SleepState::Awake
        }
    }
}
