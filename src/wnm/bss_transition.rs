//! BSS Transition Management: the AP steers stations to other access points, or
//! warns them about an upcoming disassociation.

use derive_setters::Setters;
use libwifi::frame::components::MacAddress;
use libwifi::frame::{
    BssTmQuery, BssTmRequest, BssTmStatus, NeighborReport, RequestMode, WnmAction, WnmBody,
    BSS_TERMINATION_DURATION_LEN,
};
use libwifi::parsers::{parse_bss_tm_query, parse_bss_tm_response};
use log::{debug, info, warn};

use super::ApContext;
use crate::drivers::{AcctTerminateCause, ReasonCode, TimerEvent, WpaEvent};
use crate::error::WnmError;
use crate::sta::TimeoutAction;

/// Delay between accepting a transition and deauthenticating the station.
pub const WNM_DEAUTH_DELAY_USEC: u32 = 10;

/// Dialog token of all unsolicited requests.
const UNSOLICITED_DIALOG_TOKEN: u8 = 1;

const MAX_URL_LEN: usize = 255;

/// Convert a disassociation timer (in beacon intervals) to milliseconds.
/// One TU is 1024 µs.
pub fn disassoc_timeout_ms(disassoc_timer: u16, beacon_int: u32) -> u64 {
    disassoc_timer as u64 * beacon_int as u64 * 128 / 125
}

/// Parameters of a free form BSS Transition Management Request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Setters)]
pub struct BssTmRequestParams {
    pub request_mode: RequestMode,
    pub disassoc_timer: u16,
    pub validity_interval: u8,
    /// Only sent if the request mode has the termination included bit.
    pub bss_termination_duration: Option<[u8; BSS_TERMINATION_DURATION_LEN]>,
    pub session_info_url: Option<String>,
    /// Raw neighbor report elements.
    pub neighbor_report: Vec<u8>,
}

fn check_url(url: &str) -> Result<(), WnmError> {
    if url.len() > MAX_URL_LEN {
        return Err(WnmError::UrlTooLong(url.len()));
    }
    Ok(())
}

impl ApContext<'_> {
    /// Handle a BSS Transition Management Query (the body after the action code).
    pub fn rx_bss_tm_query(&mut self, addr: &MacAddress, body: &[u8]) -> Result<(), WnmError> {
        if body.len() < 2 {
            debug!("WNM: Ignore too short BSS Transition Management Query from {addr}");
            return Err(WnmError::Malformed(format!(
                "BSS Transition Management Query is {} bytes long",
                body.len()
            )));
        }
        let BssTmQuery {
            dialog_token,
            reason,
            candidate_list,
        } = parse_bss_tm_query(body)?;

        info!(
            "WNM: BSS Transition Management Query from {addr} dialog_token={dialog_token} reason={reason}"
        );
        debug!(
            "WNM: BSS Transition Candidate List Entries: {}",
            hex::encode(&candidate_list)
        );

        self.send_bss_tm_query_reply(addr, dialog_token)
    }

    /// Answer a query with a plain request that carries no candidates.
    fn send_bss_tm_query_reply(&mut self, addr: &MacAddress, dialog_token: u8) -> Result<(), WnmError> {
        let request = BssTmRequest {
            dialog_token,
            request_mode: RequestMode::empty(),
            disassoc_timer: 0,
            validity_interval: 1,
            ..Default::default()
        };
        debug!(
            "WNM: Send BSS Transition Management Request to {addr} dialog_token={dialog_token} req_mode={:#x} disassoc_timer={} validity_interval={}",
            request.request_mode.bits(),
            request.disassoc_timer,
            request.validity_interval
        );

        let frame = WnmAction::new(self.action_header(addr), WnmBody::BssTmRequest(request));
        let payload = frame.encode_payload()?;

        self.driver
            .send_action(self.config.freq, addr, &payload)
            .map_err(|err| {
                warn!("WNM: Failed to send BSS Transition Management Request to {addr}: {err}");
                WnmError::Driver(err)
            })
    }

    /// Handle a BSS Transition Management Response (the body after the action code).
    ///
    /// If the station accepted the transition, it's disassociated right away and
    /// deauthenticated shortly after.
    pub fn rx_bss_tm_response(&mut self, addr: &MacAddress, body: &[u8]) -> Result<(), WnmError> {
        if body.len() < 3 {
            debug!("WNM: Ignore too short BSS Transition Management Response from {addr}");
            return Err(WnmError::Malformed(format!(
                "BSS Transition Management Response is {} bytes long",
                body.len()
            )));
        }
        info!(
            "WNM: BSS Transition Management Response from {addr} dialog_token={} status_code={} bss_termination_delay={}",
            body[0], body[1], body[2]
        );

        let response = parse_bss_tm_response(body).map_err(|_| {
            debug!("WNM: not enough room for Target BSSID field");
            WnmError::Malformed("BSS Transition Management Response without target BSSID".to_string())
        })?;

        match response.status {
            BssTmStatus::Accept => {
                if let Some(target) = response.target_bssid {
                    info!("WNM: BSS Transition Accepted - target BSSID: {target}");
                }
                self.disassociate_after_transition(addr)?;
            }
            BssTmStatus::RejectNoSuitableCandidates => {
                info!("WNM: BSS Transition Rejected - No Suitable Candidates");
            }
            status => {
                info!(
                    "BSS-TM-RESP {addr} status_code={} bss_termination_delay={}",
                    u8::from(status),
                    response.bss_termination_delay
                );
            }
        }

        debug!(
            "WNM: BSS Transition Candidate List Entries: {}",
            hex::encode(&response.candidate_list)
        );

        Ok(())
    }

    fn disassociate_after_transition(&mut self, addr: &MacAddress) -> Result<(), WnmError> {
        if let Err(err) = self.ensure_station(addr) {
            warn!("WNM: Station {addr} not found for BSS transition response");
            return Err(err);
        }

        self.stations.set_authorized(addr, false);
        if let Some(sta) = self.stations.station_mut(addr) {
            sta.associated = false;
        }
        self.keys.raise_event(addr, WpaEvent::Disassoc);
        self.stations.notify_port_enabled(addr, false);
        self.stations
            .set_accounting_termination_cause(addr, AcctTerminateCause::UserRequest);
        self.stations.stop_accounting(addr);
        self.stations.free_dot1x_state(addr);

        info!("WNM: {addr} disassociated due to accepted BSS transition request");

        if let Some(sta) = self.stations.station_mut(addr) {
            sta.timeout_next = TimeoutAction::Deauth;
        }
        self.scheduler.cancel_timeout(TimerEvent::StationTimer, addr);
        self.scheduler
            .schedule_timeout(0, WNM_DEAUTH_DELAY_USEC, TimerEvent::StationTimer, addr);
        self.stations
            .raise_disassociation_indication(addr, ReasonCode::DisassocStaHasLeft);

        Ok(())
    }

    /// Build a request from us to `addr` and hand it to the driver as a full frame.
    fn send_bss_tm_request_frame(
        &mut self,
        addr: &MacAddress,
        request: BssTmRequest,
    ) -> Result<(), WnmError> {
        let frame = WnmAction::new(self.action_header(addr), WnmBody::BssTmRequest(request));
        let frame = frame.encode()?;

        self.driver.send_mlme(&frame).map_err(|err| {
            warn!("WNM: Failed to send BSS Transition Management Request frame to {addr}: {err}");
            WnmError::Driver(err)
        })
    }

    /// Tell a station that it's going to be disassociated after `disassoc_timer` beacon
    /// intervals. No timer is armed, that's up to the caller.
    pub fn send_disassoc_imminent(
        &mut self,
        addr: &MacAddress,
        disassoc_timer: u16,
    ) -> Result<(), WnmError> {
        self.ensure_station(addr)?;

        debug!(
            "WNM: Send BSS Transition Management Request frame to indicate imminent disassociation (disassoc_timer={disassoc_timer}) to {addr}"
        );
        let request = BssTmRequest {
            dialog_token: UNSOLICITED_DIALOG_TOKEN,
            request_mode: RequestMode::DISASSOC_IMMINENT,
            disassoc_timer,
            validity_interval: 0,
            ..Default::default()
        };

        self.send_bss_tm_request_frame(addr, request)
    }

    /// Tell a station that it's going to lose access to the whole ESS.
    /// `url` points to a page explaining why.
    pub fn send_ess_disassoc_imminent(
        &mut self,
        addr: &MacAddress,
        url: &str,
        disassoc_timer: u16,
    ) -> Result<(), WnmError> {
        check_url(url)?;
        self.ensure_station(addr)?;

        let request = BssTmRequest {
            dialog_token: UNSOLICITED_DIALOG_TOKEN,
            request_mode: RequestMode::DISASSOC_IMMINENT | RequestMode::ESS_DISASSOC_IMMINENT,
            disassoc_timer,
            validity_interval: 1,
            session_info_url: Some(url.to_string()),
            ..Default::default()
        };
        self.send_bss_tm_request_frame(addr, request)?;

        if disassoc_timer != 0 {
            self.set_disassoc_timer(addr, disassoc_timer)?;
        }

        Ok(())
    }

    pub fn send_bss_tm_req(
        &mut self,
        addr: &MacAddress,
        params: BssTmRequestParams,
    ) -> Result<(), WnmError> {
        debug!(
            "WNM: Send BSS Transition Management Request to {addr} req_mode={:#x} disassoc_timer={} valid_int={:#x}",
            params.request_mode.bits(),
            params.disassoc_timer,
            params.validity_interval
        );
        if let Some(url) = &params.session_info_url {
            check_url(url)?;
        }
        self.ensure_station(addr)?;

        let mut request_mode = params.request_mode;
        if params.session_info_url.is_some() {
            // A URL is only read along with the ESS disassociation imminent bit.
            request_mode = request_mode | RequestMode::ESS_DISASSOC_IMMINENT;
        }

        let disassoc_timer = params.disassoc_timer;
        let request = BssTmRequest {
            dialog_token: UNSOLICITED_DIALOG_TOKEN,
            request_mode,
            disassoc_timer,
            validity_interval: params.validity_interval,
            bss_termination_duration: params.bss_termination_duration,
            session_info_url: params.session_info_url,
            candidate_list: params.neighbor_report,
        };
        self.send_bss_tm_request_frame(addr, request)?;

        if disassoc_timer != 0 {
            self.set_disassoc_timer(addr, disassoc_timer)?;
        }

        Ok(())
    }

    /// Ask a station to move to `bssid`, which operates on `ap_channel`.
    ///
    /// The candidate is advertised as reachable, with the same security and the
    /// highest preference. A non-zero `disassoc_timer` also announces the disassociation.
    pub fn send_bss_tm_req_candidate(
        &mut self,
        addr: &MacAddress,
        disassoc_timer: u16,
        bssid: &MacAddress,
        ap_channel: u8,
    ) -> Result<(), WnmError> {
        let report =
            NeighborReport::candidate(*bssid, self.config.operating_class(), ap_channel, 255);

        let mut request_mode = RequestMode::ABRIDGED | RequestMode::PREFERRED_CANDIDATE_LIST;
        if disassoc_timer > 0 {
            request_mode = request_mode | RequestMode::DISASSOC_IMMINENT;
        }

        info!(
            "WNM: Send BSS Transition Management Request client {addr} (disassoc_timer={disassoc_timer}) to AP {bssid}"
        );

        let params = BssTmRequestParams::default()
            .request_mode(request_mode)
            .disassoc_timer(disassoc_timer)
            .validity_interval(255)
            .neighbor_report(report.encode()?);

        self.send_bss_tm_req(addr, params)
    }

    /// Arm the station timer to disassociate `addr` after `disassoc_timer` beacon intervals.
    ///
    /// The cached PMKSA is dropped first, so the station can't skip a full
    /// authentication when it comes back.
    pub fn set_disassoc_timer(
        &mut self,
        addr: &MacAddress,
        disassoc_timer: u16,
    ) -> Result<(), WnmError> {
        self.keys.remove_cached_pmk(addr);

        let timeout = disassoc_timeout_ms(disassoc_timer, self.config.beacon_interval());
        debug!("WNM: Disassociation timer for {addr} set to {timeout} ms");

        let Some(sta) = self.stations.station_mut(addr) else {
            return Err(WnmError::StationNotFound(*addr));
        };
        sta.timeout_next = TimeoutAction::DisassocFromCli;

        let secs = u32::try_from(timeout / 1000).unwrap_or(u32::MAX);
        let usecs = (timeout % 1000) as u32 * 1000;
        self.scheduler.cancel_timeout(TimerEvent::StationTimer, addr);
        self.scheduler
            .schedule_timeout(secs, usecs, TimerEvent::StationTimer, addr);

        Ok(())
    }
}
