use libwifi::frame::components::{MacAddress, ManagementHeader, MANAGEMENT_HEADER_LEN};
use libwifi::frame::{ActionCategory, WnmActionCode};
use libwifi::parsers::{parse_frame_control, parse_management_header};
use log::debug;

use crate::config::ApConfig;
use crate::drivers::{Driver, KeyManagement, Scheduler, StationTable};
use crate::error::WnmError;

pub mod bss_transition;
pub mod sleep;

pub use bss_transition::{disassoc_timeout_ms, BssTmRequestParams};

/// Everything the WNM handlers work with.
///
/// The access point hands out exclusive borrows of its collaborators for the duration
/// of one call. Handlers run to completion, so no locking is needed.
pub struct ApContext<'a> {
    pub config: &'a ApConfig,
    pub driver: &'a mut dyn Driver,
    pub keys: &'a mut dyn KeyManagement,
    pub stations: &'a mut dyn StationTable,
    pub scheduler: &'a mut dyn Scheduler,
}

impl<'a> ApContext<'a> {
    pub fn new(
        config: &'a ApConfig,
        driver: &'a mut dyn Driver,
        keys: &'a mut dyn KeyManagement,
        stations: &'a mut dyn StationTable,
        scheduler: &'a mut dyn Scheduler,
    ) -> Self {
        ApContext {
            config,
            driver,
            keys,
            stations,
            scheduler,
        }
    }

    /// Header for a frame from us to `destination`.
    fn action_header(&self, destination: &MacAddress) -> ManagementHeader {
        ManagementHeader::action(*destination, self.config.own_addr)
    }

    fn ensure_station(&mut self, addr: &MacAddress) -> Result<(), WnmError> {
        if self.stations.station_mut(addr).is_none() {
            return Err(WnmError::StationNotFound(*addr));
        }
        Ok(())
    }
}

/// Handle a received WNM action frame.
///
/// `frame` is the complete management frame, header included.
/// Unsupported action codes yield [WnmError::UnsupportedAction], the frame can then
/// simply be dropped.
pub fn rx_wnm_action(ctx: &mut ApContext<'_>, frame: &[u8]) -> Result<(), WnmError> {
    if frame.len() < MANAGEMENT_HEADER_LEN + 2 {
        return Err(WnmError::Malformed(format!(
            "WNM action frame too short ({} bytes)",
            frame.len()
        )));
    }

    let (input, frame_control) =
        parse_frame_control(frame).map_err(libwifi::error::Error::from)?;
    let (input, header) = parse_management_header(frame_control, input)?;

    let category = ActionCategory::from(input[0]);
    if category != ActionCategory::Wnm {
        return Err(WnmError::Malformed(format!(
            "Expected a WNM action frame, got category {category}"
        )));
    }

    let addr = header.address_2;
    if !addr.is_real_device() {
        return Err(WnmError::Malformed(format!(
            "WNM action frame from group address {addr}"
        )));
    }
    let action = input[1];
    let body = &input[2..];

    match WnmActionCode::from(action) {
        WnmActionCode::BssTransitionMgmtQuery => ctx.rx_bss_tm_query(&addr, body),
        WnmActionCode::BssTransitionMgmtResponse => ctx.rx_bss_tm_response(&addr, body),
        WnmActionCode::SleepModeRequest => ctx.rx_sleep_mode_request(&addr, body),
        _ => {
            debug!("WNM: Unsupported WNM Action {action} from {addr}");
            Err(WnmError::UnsupportedAction(action))
        }
    }
}
