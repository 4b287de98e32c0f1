use log::debug;
use nom::bytes::complete::take;
use nom::number::complete::{le_u16, le_u32, le_u8};
use nom::sequence::tuple;

use crate::error::Error;
use crate::frame::*;
use crate::parsers::{clone_slice, parse_elements, parse_mac, ElementCursor, ElementStep};

/// Parse the body of a WNM action frame, starting right after the action code.
pub fn parse_wnm_body(action_code: WnmActionCode, input: &[u8]) -> Result<WnmBody, Error> {
    let body = match action_code {
        WnmActionCode::SleepModeRequest => {
            WnmBody::SleepModeRequest(parse_sleep_mode_request(input)?)
        }
        WnmActionCode::SleepModeResponse => {
            WnmBody::SleepModeResponse(parse_sleep_mode_response(input)?)
        }
        WnmActionCode::BssTransitionMgmtQuery => WnmBody::BssTmQuery(parse_bss_tm_query(input)?),
        WnmActionCode::BssTransitionMgmtRequest => {
            WnmBody::BssTmRequest(parse_bss_tm_request(input)?)
        }
        WnmActionCode::BssTransitionMgmtResponse => {
            WnmBody::BssTmResponse(parse_bss_tm_response(input)?)
        }
        WnmActionCode::Unknown(code) => {
            return Err(Error::UnhandledProtocol(format!("WNM action code {code}")))
        }
    };

    Ok(body)
}

/// Read a WNM-Sleep Mode element body.
/// Bodies shorter than the 4 fixed bytes are ignored.
pub fn parse_sleep_element(body: &[u8]) -> Option<WnmSleepElement> {
    if body.len() < WNM_SLEEP_ELEMENT_LEN - 2 {
        debug!("WNM: Ignoring too short WNM-Sleep element ({} bytes)", body.len());
        return None;
    }

    Some(WnmSleepElement {
        action_type: SleepActionType::from(body[0]),
        status: WnmSleepStatus::from(body[1]),
        interval: u16::from_le_bytes([body[2], body[3]]),
    })
}

/// Parse a WNM-Sleep Mode Request body.
///
/// The general structure is:
/// - Dialog token
/// - Information elements, containing one WNM-Sleep Mode element and
///   any number of TFS Request elements
///
/// If multiple sleep elements are present, the last usable one wins.
/// The TFS request span reaches from the start of the first TFS Request element to the
/// end of the last one. Elements between two TFS Requests end up in the span as well.
pub fn parse_sleep_mode_request(input: &[u8]) -> Result<SleepModeRequest, Error> {
    let (elements, dialog_token) = le_u8(input)?;

    let mut sleep = None;
    let mut tfs_start = None;
    let mut tfs_end = None;

    for step in ElementCursor::new(elements) {
        let element = match step {
            ElementStep::Item(element) => element,
            ElementStep::Truncated {
                offset,
                needed,
                available,
            } => {
                debug!(
                    "WNM: Truncated element at offset {offset} ({needed} bytes needed, {available} left)"
                );
                break;
            }
        };

        match element.id {
            WLAN_EID_WNMSLEEP => {
                if let Some(parsed) = parse_sleep_element(element.body) {
                    sleep = Some(parsed);
                }
            }
            WLAN_EID_TFS_REQ => {
                if tfs_start.is_none() {
                    tfs_start = Some(element.offset);
                }
                tfs_end = Some(element.end());
            }
            id => debug!("WNM: Unexpected element id {id} in sleep mode request"),
        }
    }

    let tfs_request = match (tfs_start, tfs_end) {
        (Some(start), Some(end)) => elements[start..end].to_vec(),
        _ => Vec::new(),
    };

    Ok(SleepModeRequest {
        dialog_token,
        sleep,
        tfs_request,
    })
}

/// Parse a WNM-Sleep Mode Response body.
///
/// The general structure is:
/// - Dialog token
/// - Key data length
/// - Key data
/// - WNM-Sleep Mode element
/// - TFS Response elements (optional)
pub fn parse_sleep_mode_response(input: &[u8]) -> Result<SleepModeResponse, Error> {
    let (input, (dialog_token, key_data_len)) = tuple((le_u8, le_u16))(input)?;
    let (input, key_data) = take(key_data_len as usize)(input)?;

    let mut cursor = ElementCursor::new(input);
    let sleep = match cursor.next() {
        Some(ElementStep::Item(element)) if element.id == WLAN_EID_WNMSLEEP => {
            parse_sleep_element(element.body)
        }
        _ => None,
    };
    let Some(sleep) = sleep else {
        return Err(Error::Failure(
            "Missing WNM-Sleep element in sleep mode response".to_string(),
            input.to_vec(),
        ));
    };

    Ok(SleepModeResponse {
        dialog_token,
        key_data: key_data.to_vec(),
        sleep,
        tfs_response: cursor.remaining().to_vec(),
    })
}

/// Parse a BSS Transition Management Query body.
///
/// The general structure is:
/// - Dialog token
/// - Query reason
/// - BSS transition candidate list (optional)
pub fn parse_bss_tm_query(input: &[u8]) -> Result<BssTmQuery, Error> {
    let (candidates, (dialog_token, reason)) = tuple((le_u8, le_u8))(input)?;

    Ok(BssTmQuery {
        dialog_token,
        reason,
        candidate_list: candidates.to_vec(),
    })
}

/// Parse a BSS Transition Management Request body.
///
/// The session information URL is only read if the ESS disassociation imminent bit is set.
pub fn parse_bss_tm_request(input: &[u8]) -> Result<BssTmRequest, Error> {
    let (mut input, (dialog_token, request_mode, disassoc_timer, validity_interval)) =
        tuple((le_u8, le_u8, le_u16, le_u8))(input)?;
    let request_mode = RequestMode(request_mode);

    let mut bss_termination_duration = None;
    if request_mode.contains(RequestMode::BSS_TERMINATION_INCLUDED) {
        let (remaining, duration) = take(BSS_TERMINATION_DURATION_LEN)(input)?;
        bss_termination_duration = Some(clone_slice::<BSS_TERMINATION_DURATION_LEN>(duration));
        input = remaining;
    }

    let mut session_info_url = None;
    if request_mode.contains(RequestMode::ESS_DISASSOC_IMMINENT) {
        let (remaining, url_len) = le_u8(input)?;
        let (remaining, url) = take(url_len as usize)(remaining)?;
        session_info_url = Some(String::from_utf8_lossy(url).into_owned());
        input = remaining;
    }

    Ok(BssTmRequest {
        dialog_token,
        request_mode,
        disassoc_timer,
        validity_interval,
        bss_termination_duration,
        session_info_url,
        candidate_list: input.to_vec(),
    })
}

/// Parse a BSS Transition Management Response body.
///
/// The general structure is:
/// - Dialog token
/// - Status code
/// - BSS termination delay
/// - Target BSSID (only if the status is accept)
/// - BSS transition candidate list (optional)
pub fn parse_bss_tm_response(input: &[u8]) -> Result<BssTmResponse, Error> {
    let (mut input, (dialog_token, status, bss_termination_delay)) =
        tuple((le_u8, le_u8, le_u8))(input)?;
    let status = BssTmStatus::from(status);

    let mut target_bssid = None;
    if status == BssTmStatus::Accept {
        let (remaining, bssid) = parse_mac(input)?;
        target_bssid = Some(bssid);
        input = remaining;
    }

    Ok(BssTmResponse {
        dialog_token,
        status,
        bss_termination_delay,
        target_bssid,
        candidate_list: input.to_vec(),
    })
}

/// Parse the neighbor report elements of a candidate list.
/// Other elements, and reports too short for their fixed fields, are skipped.
pub fn parse_neighbor_reports(input: &[u8]) -> Vec<NeighborReport> {
    ElementCursor::new(input)
        .elements()
        .filter(|element| element.id == WLAN_EID_NEIGHBOR_REPORT)
        .filter_map(|element| parse_neighbor_report(element.body).ok())
        .collect()
}

fn parse_neighbor_report(body: &[u8]) -> Result<NeighborReport, Error> {
    let (subelements, (bssid, bssid_info, operating_class, channel, phy_type)) =
        tuple((parse_mac, le_u32, le_u8, le_u8, le_u8))(body)?;

    Ok(NeighborReport {
        bssid,
        bssid_info,
        operating_class,
        channel,
        phy_type,
        subelements: parse_elements(subelements)
            .into_iter()
            .map(|element| (element.id, element.body.to_vec()))
            .collect(),
    })
}
