//! Interfaces to the rest of the access point.
//!
//! The WNM engine never talks to hardware, key management, the station table or
//! the event loop directly. Everything goes through these traits, which are
//! implemented by the embedding access point (and by fakes in tests).

use libwifi::error::Error;
use libwifi::frame::components::MacAddress;
use libwifi::frame::MAX_TFS_IE_LEN;
use strum_macros::Display;

use crate::sta::Station;

/// Driver operations related to WNM-Sleep Mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum WnmOper {
    /// Pause the station's queues, it's now sleeping.
    SleepEnterConfirm,
    /// Resume the station's queues.
    SleepExitConfirm,
    /// Fetch the TFS Response elements for a station entering sleep mode.
    TfsRespIeAdd,
    /// Fetch the TFS Response elements for any other response.
    TfsRespIeNone,
    /// Install the TFS Request elements of a station.
    TfsReqIeSet,
    /// Remove all TFS filters of a station.
    TfsIeDel,
}

/// Key management events raised by the WNM engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum WpaEvent {
    Disassoc,
}

/// RADIUS accounting termination causes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AcctTerminateCause {
    UserRequest,
}

/// IEEE 802.11 reason codes used in MLME indications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ReasonCode {
    /// Disassociated because the sending station is leaving (or has left) the BSS.
    DisassocStaHasLeft,
}

impl From<ReasonCode> for u16 {
    fn from(reason: ReasonCode) -> Self {
        match reason {
            ReasonCode::DisassocStaHasLeft => 8,
        }
    }
}

/// Deferred events the engine schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TimerEvent {
    /// The per station timer, acting on [Station::timeout_next].
    StationTimer,
}

/// A buffer of TFS elements exchanged with the driver.
/// It never holds more than [MAX_TFS_IE_LEN] bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TfsBuffer {
    data: Vec<u8>,
}

impl TfsBuffer {
    pub fn new() -> Self {
        TfsBuffer::default()
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let mut buffer = TfsBuffer::new();
        buffer.fill(bytes)?;

        Ok(buffer)
    }

    /// Replace the content of the buffer.
    pub fn fill(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if bytes.len() > MAX_TFS_IE_LEN {
            return Err(Error::BufferTooSmall {
                needed: bytes.len(),
                limit: MAX_TFS_IE_LEN,
            });
        }
        self.data.clear();
        self.data.extend_from_slice(bytes);

        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

pub trait Driver {
    /// Send an action frame payload (category onwards) to `dst` on `freq`.
    /// Drivers must transmit it even if the station is in power save.
    fn send_action(&mut self, freq: u32, dst: &MacAddress, payload: &[u8]) -> anyhow::Result<()>;

    /// Send a complete management frame, header included.
    fn send_mlme(&mut self, frame: &[u8]) -> anyhow::Result<()>;

    fn wnm_oper(
        &mut self,
        oper: WnmOper,
        addr: &MacAddress,
        buf: &mut TfsBuffer,
    ) -> anyhow::Result<()>;
}

pub trait KeyManagement {
    fn uses_mfp(&self, addr: &MacAddress) -> bool;

    /// Whether the authenticator manages an IGTK at all.
    fn igtk_supported(&self) -> bool;

    /// The GTK subelement for a WNM-Sleep Mode response.
    fn gtk_subelement(&mut self, addr: &MacAddress) -> Vec<u8>;

    /// The IGTK subelement for a WNM-Sleep Mode response.
    fn igtk_subelement(&mut self, addr: &MacAddress) -> anyhow::Result<Vec<u8>>;

    /// While set, no group key updates are sent to the station.
    fn set_sleep_suppression(&mut self, addr: &MacAddress, suppressed: bool);

    fn trigger_gtk_rekey(&mut self, addr: &MacAddress);

    fn raise_event(&mut self, addr: &MacAddress, event: WpaEvent);

    /// Forget the cached PMKSA, so the station has to do a full authentication next time.
    fn remove_cached_pmk(&mut self, addr: &MacAddress);
}

pub trait StationTable {
    fn station_mut(&mut self, addr: &MacAddress) -> Option<&mut Station>;

    fn set_authorized(&mut self, addr: &MacAddress, authorized: bool);

    fn notify_port_enabled(&mut self, addr: &MacAddress, enabled: bool);

    fn set_accounting_termination_cause(&mut self, addr: &MacAddress, cause: AcctTerminateCause);

    fn stop_accounting(&mut self, addr: &MacAddress);

    fn free_dot1x_state(&mut self, addr: &MacAddress);

    fn raise_disassociation_indication(&mut self, addr: &MacAddress, reason: ReasonCode);
}

pub trait Scheduler {
    fn cancel_timeout(&mut self, event: TimerEvent, addr: &MacAddress);

    fn schedule_timeout(&mut self, secs: u32, usecs: u32, event: TimerEvent, addr: &MacAddress);
}
