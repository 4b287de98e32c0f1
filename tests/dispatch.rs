mod common;

use common::{frame_from_sta, Call, FakeAp, STA_ADDR};
use libwifi::frame::components::MANAGEMENT_HEADER_LEN;
use libwifi::frame::ActionCategory;
use wnm_ap::drivers::WnmOper;
use wnm_ap::sta::SleepState;
use wnm_ap::{rx_wnm_action, WnmError};

#[test]
fn test_short_frames() {
    let mut ap = FakeAp::new();

    let frame = frame_from_sta(6, &[]);
    for len in [0, 10, MANAGEMENT_HEADER_LEN, MANAGEMENT_HEADER_LEN + 1] {
        let result = rx_wnm_action(&mut ap.ctx(), &frame[..len]);
        assert!(
            matches!(result, Err(WnmError::Malformed(_))),
            "{len} bytes should be rejected"
        );
    }
    assert!(ap.calls().is_empty());
}

#[test]
fn test_unsupported_actions() {
    let mut ap = FakeAp::new();

    // Sleep mode response, notification request and a reserved code
    for action in [17, 26, 200] {
        let result = rx_wnm_action(&mut ap.ctx(), &frame_from_sta(action, &[1, 2, 3]));
        assert!(matches!(result, Err(WnmError::UnsupportedAction(code)) if code == action));
    }
    assert!(ap.calls().is_empty());
}

#[test]
fn test_other_category() {
    let mut ap = FakeAp::new();

    let mut frame = frame_from_sta(6, &[9, 0]);
    frame[MANAGEMENT_HEADER_LEN] = ActionCategory::SaQuery.into();

    let result = rx_wnm_action(&mut ap.ctx(), &frame);
    assert!(matches!(result, Err(WnmError::Malformed(_))));
    assert!(ap.calls().is_empty());
}

#[test]
fn test_query_is_routed() {
    let mut ap = FakeAp::new();

    rx_wnm_action(&mut ap.ctx(), &frame_from_sta(6, &[9, 0])).unwrap();
    assert_eq!(ap.sent_actions(), vec![vec![10, 7, 9, 0, 0, 0, 1]]);
}

#[test]
fn test_response_is_routed() {
    let mut ap = FakeAp::new();

    let body = [3, 0, 0, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff];
    rx_wnm_action(&mut ap.ctx(), &frame_from_sta(8, &body)).unwrap();
    assert!(!ap.station().associated);
}

#[test]
fn test_sleep_request_is_routed() {
    let mut ap = FakeAp::new();

    let body = [5, 93, 4, 0, 0, 10, 0];
    rx_wnm_action(&mut ap.ctx(), &frame_from_sta(16, &body)).unwrap();

    assert_eq!(ap.station().sleep_state(), SleepState::Sleeping);
    assert_eq!(
        ap.calls()[0],
        Call::WnmOper(WnmOper::TfsRespIeAdd, STA_ADDR, vec![])
    );
}

#[test]
fn test_handler_errors_propagate() {
    let mut ap = FakeAp::new();

    // A sleep request without a sleep element
    let result = rx_wnm_action(&mut ap.ctx(), &frame_from_sta(16, &[5]));
    assert!(matches!(result, Err(WnmError::Malformed(_))));
}

#[test]
fn test_group_source_address() {
    let mut ap = FakeAp::new();

    let mut frame = frame_from_sta(6, &[9, 0]);
    frame[10..16].copy_from_slice(&[0xff; 6]);

    let result = rx_wnm_action(&mut ap.ctx(), &frame);
    assert!(matches!(result, Err(WnmError::Malformed(_))));
    assert!(ap.calls().is_empty());
}
