mod common;

use common::{Call, FakeAp, AP_ADDR, STA_ADDR};
use libwifi::frame::components::{MacAddress, MANAGEMENT_HEADER_LEN};
use libwifi::frame::{RequestMode, WnmBody};
use libwifi::Frame;
use wnm_ap::drivers::{AcctTerminateCause, ReasonCode, TimerEvent, WpaEvent};
use wnm_ap::sta::TimeoutAction;
use wnm_ap::wnm::BssTmRequestParams;
use wnm_ap::WnmError;

const TARGET: MacAddress = MacAddress([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);

fn schedule(secs: u32, usecs: u32) -> Call {
    Call::ScheduleTimeout {
        secs,
        usecs,
        event: TimerEvent::StationTimer,
        addr: STA_ADDR,
    }
}

#[test]
fn test_accepted_transition_disassociates() {
    let mut ap = FakeAp::new();

    let body = [
        3, // Dialog token
        0, // Status: accept
        0, // BSS termination delay
        0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff, // Target BSSID
    ];
    ap.ctx().rx_bss_tm_response(&STA_ADDR, &body).unwrap();

    assert!(!ap.station().associated);
    assert_eq!(ap.station().timeout_next, TimeoutAction::Deauth);
    assert_eq!(
        ap.calls(),
        vec![
            Call::SetAuthorized(STA_ADDR, false),
            Call::RaiseEvent(STA_ADDR, WpaEvent::Disassoc),
            Call::NotifyPortEnabled(STA_ADDR, false),
            Call::SetAccountingTerminationCause(STA_ADDR, AcctTerminateCause::UserRequest),
            Call::StopAccounting(STA_ADDR),
            Call::FreeDot1xState(STA_ADDR),
            Call::CancelTimeout(TimerEvent::StationTimer, STA_ADDR),
            schedule(0, 10),
            Call::DisassociationIndication(STA_ADDR, ReasonCode::DisassocStaHasLeft),
        ]
    );
    assert_eq!(u16::from(ReasonCode::DisassocStaHasLeft), 8);
}

#[test]
fn test_rejected_transition_changes_nothing() {
    let mut ap = FakeAp::new();

    // No suitable candidates, with a trailing neighbor report
    let mut body = vec![3, 7, 0];
    body.extend_from_slice(&[52, 0]);
    ap.ctx().rx_bss_tm_response(&STA_ADDR, &body).unwrap();

    // Any other rejection
    ap.ctx().rx_bss_tm_response(&STA_ADDR, &[4, 1, 0]).unwrap();

    assert!(ap.station().associated);
    assert_eq!(ap.station().timeout_next, TimeoutAction::NoAction);
    assert!(ap.calls().is_empty());
}

#[test]
fn test_truncated_response() {
    let mut ap = FakeAp::new();

    let result = ap.ctx().rx_bss_tm_response(&STA_ADDR, &[3, 0]);
    assert!(matches!(result, Err(WnmError::Malformed(_))));

    // Accepted, but the target BSSID is cut short.
    let result = ap
        .ctx()
        .rx_bss_tm_response(&STA_ADDR, &[3, 0, 0, 0xaa, 0xbb, 0xcc, 0xdd, 0xee]);
    assert!(matches!(result, Err(WnmError::Malformed(_))));

    assert!(ap.station().associated);
    assert!(ap.calls().is_empty());
}

#[test]
fn test_accept_from_unknown_station() {
    let mut ap = FakeAp::new();
    let stranger = MacAddress([0x02, 0, 0, 0, 0, 0x99]);

    let result = ap
        .ctx()
        .rx_bss_tm_response(&stranger, &[3, 0, 0, 1, 2, 3, 4, 5, 6]);
    assert!(matches!(result, Err(WnmError::StationNotFound(_))));
    assert!(ap.calls().is_empty());
}

#[test]
fn test_query_is_answered() {
    let mut ap = FakeAp::new();

    let body = [
        9,  // Dialog token
        18, // Query reason
        52, 0, // Empty neighbor report
    ];
    ap.ctx().rx_bss_tm_query(&STA_ADDR, &body).unwrap();

    assert_eq!(
        ap.calls(),
        vec![Call::SendAction {
            freq: 2437,
            dst: STA_ADDR,
            payload: vec![
                10, // Category WNM
                7,  // BSS Transition Management Request
                9,  // Dialog token of the query
                0,  // Request mode
                0, 0, // Disassociation timer
                1, // Validity interval
            ],
        }]
    );
}

#[test]
fn test_short_query() {
    let mut ap = FakeAp::new();

    let result = ap.ctx().rx_bss_tm_query(&STA_ADDR, &[9]);
    assert!(matches!(result, Err(WnmError::Malformed(_))));
    assert!(ap.calls().is_empty());
}

#[test]
fn test_disassoc_timer() {
    let mut ap = FakeAp::new();

    ap.ctx().set_disassoc_timer(&STA_ADDR, 10).unwrap();

    assert_eq!(ap.station().timeout_next, TimeoutAction::DisassocFromCli);
    assert_eq!(
        ap.calls(),
        vec![
            Call::RemoveCachedPmk(STA_ADDR),
            Call::CancelTimeout(TimerEvent::StationTimer, STA_ADDR),
            // 10 * 100 TU = 1024 ms
            schedule(1, 24_000),
        ]
    );
}

#[test]
fn test_disassoc_timer_default_beacon_interval() {
    let mut ap = FakeAp::new();
    ap.config.beacon_int = 0;

    ap.ctx().set_disassoc_timer(&STA_ADDR, 10).unwrap();
    assert_eq!(ap.calls().last(), Some(&schedule(1, 24_000)));
}

#[test]
fn test_candidate_request() {
    let mut ap = FakeAp::new();

    ap.ctx()
        .send_bss_tm_req_candidate(&STA_ADDR, 0, &TARGET, 6)
        .unwrap();

    let frames = ap.sent_frames();
    assert_eq!(frames.len(), 1);
    let frame = &frames[0];

    // Action frame from us to the station
    assert_eq!(&frame[0..2], &[0xd0, 0x00]);
    assert_eq!(&frame[4..10], &STA_ADDR.0);
    assert_eq!(&frame[10..16], &AP_ADDR.0);
    assert_eq!(&frame[16..22], &AP_ADDR.0);

    assert_eq!(
        &frame[MANAGEMENT_HEADER_LEN..],
        &[
            10, // Category WNM
            7,  // BSS Transition Management Request
            1,  // Dialog token
            0x03, // Abridged, preferred candidate list
            0, 0,   // Disassociation timer
            255, // Validity interval
            52, 16, // Neighbor report
            0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff, // BSSID
            0x07, 0, 0, 0,  // BSSID info: reachable, security
            81, // Operating class of 2437 MHz
            6,  // Channel
            0,  // PHY type
            3, 1, 255, // Candidate preference
        ][..]
    );

    // No disassociation, no timer.
    assert!(!ap
        .calls()
        .iter()
        .any(|call| matches!(call, Call::ScheduleTimeout { .. })));
}

#[test]
fn test_candidate_request_with_timer() {
    let mut ap = FakeAp::new();
    ap.config.freq = 5180;

    ap.ctx()
        .send_bss_tm_req_candidate(&STA_ADDR, 5, &TARGET, 36)
        .unwrap();

    let frame = libwifi::parse_frame(&ap.sent_frames()[0], false).unwrap();
    let Frame::Wnm(wnm) = frame else {
        panic!("Expected a WNM frame");
    };
    let WnmBody::BssTmRequest(request) = wnm.body else {
        panic!("Expected a BSS Transition Management Request");
    };
    assert_eq!(
        request.request_mode,
        RequestMode::ABRIDGED | RequestMode::PREFERRED_CANDIDATE_LIST | RequestMode::DISASSOC_IMMINENT
    );
    assert_eq!(request.disassoc_timer, 5);
    assert_eq!(request.candidate_list[12], 115);

    let calls = ap.calls();
    assert_eq!(
        &calls[1..],
        &[
            Call::RemoveCachedPmk(STA_ADDR),
            Call::CancelTimeout(TimerEvent::StationTimer, STA_ADDR),
            // 5 * 100 TU = 512 ms
            schedule(0, 512_000),
        ]
    );
}

#[test]
fn test_disassoc_imminent() {
    let mut ap = FakeAp::new();

    ap.ctx().send_disassoc_imminent(&STA_ADDR, 20).unwrap();

    let frames = ap.sent_frames();
    assert_eq!(
        &frames[0][MANAGEMENT_HEADER_LEN..],
        &[10, 7, 1, 0x04, 20, 0, 0]
    );
    // The caller is in charge of the timer.
    assert_eq!(ap.calls().len(), 1);
}

#[test]
fn test_ess_disassoc_imminent() {
    let mut ap = FakeAp::new();
    let url = "http://example.com/bye";

    ap.ctx()
        .send_ess_disassoc_imminent(&STA_ADDR, url, 10)
        .unwrap();

    let frames = ap.sent_frames();
    let payload = &frames[0][MANAGEMENT_HEADER_LEN..];
    assert_eq!(&payload[..7], &[10, 7, 1, 0x14, 10, 0, 1]);
    assert_eq!(payload[7] as usize, url.len());
    assert_eq!(&payload[8..], url.as_bytes());

    assert_eq!(ap.calls().last(), Some(&schedule(1, 24_000)));
}

#[test]
fn test_url_too_long() {
    let mut ap = FakeAp::new();
    let url = format!("http://{}", "a".repeat(250));

    let result = ap.ctx().send_ess_disassoc_imminent(&STA_ADDR, &url, 10);
    assert!(matches!(result, Err(WnmError::UrlTooLong(257))));
    assert!(ap.calls().is_empty());
}

#[test]
fn test_free_form_request() {
    let mut ap = FakeAp::new();
    let duration = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

    let params = BssTmRequestParams::default()
        .request_mode(RequestMode::BSS_TERMINATION_INCLUDED | RequestMode::DISASSOC_IMMINENT)
        .disassoc_timer(0u16)
        .validity_interval(30u8)
        .bss_termination_duration(Some(duration))
        .neighbor_report(vec![52, 0]);
    ap.ctx().send_bss_tm_req(&STA_ADDR, params).unwrap();

    let frames = ap.sent_frames();
    let payload = &frames[0][MANAGEMENT_HEADER_LEN..];
    assert_eq!(&payload[..7], &[10, 7, 1, 0x0c, 0, 0, 30]);
    assert_eq!(&payload[7..19], &duration);
    assert_eq!(&payload[19..], &[52, 0]);

    // Zero timer, nothing armed.
    assert_eq!(ap.calls().len(), 1);
}

#[test]
fn test_url_sets_ess_disassoc_imminent() {
    let mut ap = FakeAp::new();

    let params = BssTmRequestParams::default()
        .request_mode(RequestMode::DISASSOC_IMMINENT)
        .session_info_url(Some("http://x".to_string()))
        .neighbor_report(vec![52, 0]);
    ap.ctx().send_bss_tm_req(&STA_ADDR, params).unwrap();

    let frame = libwifi::parse_frame(&ap.sent_frames()[0], false).unwrap();
    let Frame::Wnm(wnm) = frame else {
        panic!("Expected a WNM frame");
    };
    let WnmBody::BssTmRequest(request) = wnm.body else {
        panic!("Expected a BSS Transition Management Request");
    };
    assert_eq!(
        request.request_mode,
        RequestMode::DISASSOC_IMMINENT | RequestMode::ESS_DISASSOC_IMMINENT
    );
    assert_eq!(request.session_info_url.as_deref(), Some("http://x"));
    assert_eq!(request.candidate_list, vec![52, 0]);
}

#[test]
fn test_send_failure_arms_no_timer() {
    let mut ap = FakeAp::new();
    ap.driver.fail_send = true;

    let params = BssTmRequestParams::default()
        .request_mode(RequestMode::DISASSOC_IMMINENT)
        .disassoc_timer(10u16);
    let result = ap.ctx().send_bss_tm_req(&STA_ADDR, params);

    assert!(matches!(result, Err(WnmError::Driver(_))));
    assert!(ap.calls().is_empty());
    assert_eq!(ap.station().timeout_next, TimeoutAction::NoAction);
}

#[test]
fn test_request_to_unknown_station() {
    let mut ap = FakeAp::new();
    let stranger = MacAddress([0x02, 0, 0, 0, 0, 0x99]);

    let result = ap.ctx().send_disassoc_imminent(&stranger, 10);
    assert!(matches!(result, Err(WnmError::StationNotFound(_))));
    assert!(ap.sent_frames().is_empty());
}
