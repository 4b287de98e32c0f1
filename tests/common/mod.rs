#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use libwifi::frame::components::{MacAddress, ManagementHeader};
use libwifi::frame::ActionCategory;

use wnm_ap::drivers::{
    AcctTerminateCause, Driver, KeyManagement, ReasonCode, Scheduler, StationTable, TfsBuffer,
    TimerEvent, WnmOper, WpaEvent,
};
use wnm_ap::sta::Station;
use wnm_ap::{ApConfig, ApContext};

pub const AP_ADDR: MacAddress = MacAddress([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
pub const STA_ADDR: MacAddress = MacAddress([0x02, 0x00, 0x00, 0x00, 0x00, 0x02]);

/// Everything the fakes were asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SendAction {
        freq: u32,
        dst: MacAddress,
        payload: Vec<u8>,
    },
    SendMlme(Vec<u8>),
    /// The buffer content as handed to the driver.
    WnmOper(WnmOper, MacAddress, Vec<u8>),
    SetSleepSuppression(MacAddress, bool),
    TriggerGtkRekey(MacAddress),
    RaiseEvent(MacAddress, WpaEvent),
    RemoveCachedPmk(MacAddress),
    SetAuthorized(MacAddress, bool),
    NotifyPortEnabled(MacAddress, bool),
    SetAccountingTerminationCause(MacAddress, AcctTerminateCause),
    StopAccounting(MacAddress),
    FreeDot1xState(MacAddress),
    DisassociationIndication(MacAddress, ReasonCode),
    CancelTimeout(TimerEvent, MacAddress),
    ScheduleTimeout {
        secs: u32,
        usecs: u32,
        event: TimerEvent,
        addr: MacAddress,
    },
}

pub type Journal = Rc<RefCell<Vec<Call>>>;

pub struct FakeDriver {
    journal: Journal,
    pub fail_send: bool,
    pub fail_tfs_get: bool,
    /// Handed out for [WnmOper::TfsRespIeAdd].
    pub tfs_response: Vec<u8>,
}

impl Driver for FakeDriver {
    fn send_action(&mut self, freq: u32, dst: &MacAddress, payload: &[u8]) -> Result<()> {
        if self.fail_send {
            return Err(anyhow!("tx queue full"));
        }
        self.journal.borrow_mut().push(Call::SendAction {
            freq,
            dst: *dst,
            payload: payload.to_vec(),
        });
        Ok(())
    }

    fn send_mlme(&mut self, frame: &[u8]) -> Result<()> {
        if self.fail_send {
            return Err(anyhow!("tx queue full"));
        }
        self.journal.borrow_mut().push(Call::SendMlme(frame.to_vec()));
        Ok(())
    }

    fn wnm_oper(&mut self, oper: WnmOper, addr: &MacAddress, buf: &mut TfsBuffer) -> Result<()> {
        self.journal
            .borrow_mut()
            .push(Call::WnmOper(oper, *addr, buf.as_bytes().to_vec()));

        match oper {
            WnmOper::TfsRespIeAdd | WnmOper::TfsRespIeNone if self.fail_tfs_get => {
                Err(anyhow!("no TFS state for {addr}"))
            }
            WnmOper::TfsRespIeAdd => Ok(buf.fill(&self.tfs_response)?),
            _ => Ok(()),
        }
    }
}

pub struct FakeKeys {
    journal: Journal,
    pub mfp: bool,
    pub igtk: bool,
    pub gtk_subelement: Vec<u8>,
    pub igtk_subelement: Vec<u8>,
    pub fail_igtk: bool,
}

impl KeyManagement for FakeKeys {
    fn uses_mfp(&self, _addr: &MacAddress) -> bool {
        self.mfp
    }

    fn igtk_supported(&self) -> bool {
        self.igtk
    }

    fn gtk_subelement(&mut self, _addr: &MacAddress) -> Vec<u8> {
        self.gtk_subelement.clone()
    }

    fn igtk_subelement(&mut self, _addr: &MacAddress) -> Result<Vec<u8>> {
        if self.fail_igtk {
            return Err(anyhow!("no IGTK configured"));
        }
        Ok(self.igtk_subelement.clone())
    }

    fn set_sleep_suppression(&mut self, addr: &MacAddress, suppressed: bool) {
        self.journal
            .borrow_mut()
            .push(Call::SetSleepSuppression(*addr, suppressed));
    }

    fn trigger_gtk_rekey(&mut self, addr: &MacAddress) {
        self.journal.borrow_mut().push(Call::TriggerGtkRekey(*addr));
    }

    fn raise_event(&mut self, addr: &MacAddress, event: WpaEvent) {
        self.journal.borrow_mut().push(Call::RaiseEvent(*addr, event));
    }

    fn remove_cached_pmk(&mut self, addr: &MacAddress) {
        self.journal.borrow_mut().push(Call::RemoveCachedPmk(*addr));
    }
}

pub struct FakeStations {
    journal: Journal,
    pub stations: HashMap<MacAddress, Station>,
}

impl StationTable for FakeStations {
    fn station_mut(&mut self, addr: &MacAddress) -> Option<&mut Station> {
        self.stations.get_mut(addr)
    }

    fn set_authorized(&mut self, addr: &MacAddress, authorized: bool) {
        self.journal
            .borrow_mut()
            .push(Call::SetAuthorized(*addr, authorized));
    }

    fn notify_port_enabled(&mut self, addr: &MacAddress, enabled: bool) {
        self.journal
            .borrow_mut()
            .push(Call::NotifyPortEnabled(*addr, enabled));
    }

    fn set_accounting_termination_cause(&mut self, addr: &MacAddress, cause: AcctTerminateCause) {
        self.journal
            .borrow_mut()
            .push(Call::SetAccountingTerminationCause(*addr, cause));
    }

    fn stop_accounting(&mut self, addr: &MacAddress) {
        self.journal.borrow_mut().push(Call::StopAccounting(*addr));
    }

    fn free_dot1x_state(&mut self, addr: &MacAddress) {
        self.journal.borrow_mut().push(Call::FreeDot1xState(*addr));
    }

    fn raise_disassociation_indication(&mut self, addr: &MacAddress, reason: ReasonCode) {
        self.journal
            .borrow_mut()
            .push(Call::DisassociationIndication(*addr, reason));
    }
}

pub struct FakeScheduler {
    journal: Journal,
}

impl Scheduler for FakeScheduler {
    fn cancel_timeout(&mut self, event: TimerEvent, addr: &MacAddress) {
        self.journal
            .borrow_mut()
            .push(Call::CancelTimeout(event, *addr));
    }

    fn schedule_timeout(&mut self, secs: u32, usecs: u32, event: TimerEvent, addr: &MacAddress) {
        self.journal.borrow_mut().push(Call::ScheduleTimeout {
            secs,
            usecs,
            event,
            addr: *addr,
        });
    }
}

/// An access point with a single associated station, [STA_ADDR].
pub struct FakeAp {
    pub config: ApConfig,
    pub driver: FakeDriver,
    pub keys: FakeKeys,
    pub stations: FakeStations,
    pub scheduler: FakeScheduler,
    pub journal: Journal,
}

impl FakeAp {
    pub fn new() -> Self {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let mut stations = HashMap::new();
        stations.insert(STA_ADDR, Station::new(STA_ADDR));

        FakeAp {
            config: ApConfig::default().own_addr(AP_ADDR),
            driver: FakeDriver {
                journal: journal.clone(),
                fail_send: false,
                fail_tfs_get: false,
                tfs_response: Vec::new(),
            },
            keys: FakeKeys {
                journal: journal.clone(),
                mfp: false,
                igtk: false,
                gtk_subelement: Vec::new(),
                igtk_subelement: Vec::new(),
                fail_igtk: false,
            },
            stations: FakeStations {
                journal: journal.clone(),
                stations,
            },
            scheduler: FakeScheduler {
                journal: journal.clone(),
            },
            journal,
        }
    }

    pub fn ctx(&mut self) -> ApContext<'_> {
        ApContext::new(
            &self.config,
            &mut self.driver,
            &mut self.keys,
            &mut self.stations,
            &mut self.scheduler,
        )
    }

    pub fn station(&self) -> &Station {
        &self.stations.stations[&STA_ADDR]
    }

    pub fn calls(&self) -> Vec<Call> {
        self.journal.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.journal.borrow_mut().clear();
    }

    /// All payloads handed to `send_action`.
    pub fn sent_actions(&self) -> Vec<Vec<u8>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::SendAction { payload, .. } => Some(payload),
                _ => None,
            })
            .collect()
    }

    /// All frames handed to `send_mlme`.
    pub fn sent_frames(&self) -> Vec<Vec<u8>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::SendMlme(frame) => Some(frame),
                _ => None,
            })
            .collect()
    }
}

/// A complete WNM action frame from [STA_ADDR] to [AP_ADDR].
pub fn frame_from_sta(action: u8, body: &[u8]) -> Vec<u8> {
    let mut header = ManagementHeader::action(AP_ADDR, STA_ADDR);
    header.address_3 = AP_ADDR;

    let mut frame = header.encode().to_vec();
    frame.push(ActionCategory::Wnm.into());
    frame.push(action);
    frame.extend_from_slice(body);

    frame
}
