//! WNM-Sleep Mode: stations announce they're going to sleep for a number of beacon
//! intervals, optionally asking the AP to filter their traffic (TFS) in the meantime.

use libwifi::frame::components::MacAddress;
use libwifi::frame::{
    SleepActionType, SleepModeResponse, WnmAction, WnmBody, WnmSleepElement, WnmSleepStatus,
};
use libwifi::parsers::parse_sleep_mode_request;
use log::{debug, warn};

use super::ApContext;
use crate::drivers::{TfsBuffer, WnmOper};
use crate::error::WnmError;

pub const MAX_GTK_SUBELEM_LEN: usize = 45;
pub const MAX_IGTK_SUBELEM_LEN: usize = 26;

impl ApContext<'_> {
    /// Handle a WNM-Sleep Mode Request (the body after the action code).
    pub fn rx_sleep_mode_request(
        &mut self,
        addr: &MacAddress,
        body: &[u8],
    ) -> Result<(), WnmError> {
        let request = parse_sleep_mode_request(body)
            .map_err(|err| WnmError::Malformed(format!("WNM-Sleep request: {err}")))?;

        let Some(sleep) = request.sleep else {
            debug!("WNM: No WNM-Sleep element found in request from {addr}");
            return Err(WnmError::Malformed(
                "WNM-Sleep request without WNM-Sleep element".to_string(),
            ));
        };

        // Anything between the first and the last TFS Request element is passed on as well.
        // A span that does not fit the driver buffer is treated like a failed TFS set.
        let mut tfs = match TfsBuffer::from_slice(&request.tfs_request) {
            Ok(tfs) => tfs,
            Err(err) => {
                warn!("WNM: Ignoring TFS Req elements from {addr}: {err}");
                TfsBuffer::new()
            }
        };

        if sleep.action_type == SleepActionType::Enter && !tfs.is_empty() {
            debug!("WNM: TFS Req element(s) found, passing them to the driver");
            if let Err(err) = self.driver.wnm_oper(WnmOper::TfsReqIeSet, addr, &mut tfs) {
                debug!("WNM: Failed to set TFS Req elements for {addr}: {err}");
            }
        }

        let result = self.send_wnmsleep_resp(
            addr,
            request.dialog_token,
            sleep.action_type,
            sleep.interval,
        );

        if sleep.action_type == SleepActionType::Exit {
            // The filters are cleared whether or not the response made it out.
            if let Err(err) = self.driver.wnm_oper(WnmOper::TfsIeDel, addr, &mut tfs) {
                debug!("WNM: Failed to delete TFS elements for {addr}: {err}");
            }
        }

        result
    }

    /// Send a WNM-Sleep Mode Response and, once it's out, move the station in or out
    /// of sleep mode.
    pub fn send_wnmsleep_resp(
        &mut self,
        addr: &MacAddress,
        dialog_token: u8,
        action_type: SleepActionType,
        interval: u16,
    ) -> Result<(), WnmError> {
        if let Err(err) = self.ensure_station(addr) {
            warn!("WNM: Station {addr} not found for WNM-Sleep response");
            return Err(err);
        }

        let sleep = WnmSleepElement {
            action_type,
            status: WnmSleepStatus::Accept,
            interval,
        };

        let tfs_oper = if action_type == SleepActionType::Enter {
            WnmOper::TfsRespIeAdd
        } else {
            WnmOper::TfsRespIeNone
        };
        let mut tfs = TfsBuffer::new();
        let tfs_response = match self.driver.wnm_oper(tfs_oper, addr, &mut tfs) {
            Ok(()) => tfs.as_bytes().to_vec(),
            Err(err) => {
                debug!("WNM: TFS get operation {tfs_oper} failed for {addr}: {err}");
                Vec::new()
            }
        };

        let uses_mfp = self.keys.uses_mfp(addr);
        let key_data = if uses_mfp && action_type == SleepActionType::Exit {
            self.wnmsleep_key_data(addr)?
        } else {
            Vec::new()
        };

        let response = WnmAction::new(
            self.action_header(addr),
            WnmBody::SleepModeResponse(SleepModeResponse {
                dialog_token,
                key_data,
                sleep,
                tfs_response,
            }),
        );
        let payload = response.encode_payload()?;

        if let Err(err) = self.driver.send_action(self.config.freq, addr, &payload) {
            warn!("WNM: Failed to send WNM-Sleep Response frame to {addr}: {err}");
            return Err(WnmError::Driver(err));
        }
        debug!("WNM: Sent WNM-Sleep Response to {addr}");

        if action_type == SleepActionType::Enter && sleep.status == WnmSleepStatus::Accept {
            self.set_station_sleeping(addr, true);
            self.confirm_sleep_oper(WnmOper::SleepEnterConfirm, addr);
            self.keys.set_sleep_suppression(addr, true);
        }

        if action_type == SleepActionType::Exit && sleep.status.is_exit_accept() {
            self.set_station_sleeping(addr, false);
            self.keys.set_sleep_suppression(addr, false);
            self.confirm_sleep_oper(WnmOper::SleepExitConfirm, addr);
            // Without MFP the key data wasn't part of the response, so the group keys
            // have to be refreshed the regular way.
            if !uses_mfp {
                self.keys.trigger_gtk_rekey(addr);
            }
        }

        Ok(())
    }

    /// GTK subelement, followed by the IGTK subelement if we have one.
    fn wnmsleep_key_data(&mut self, addr: &MacAddress) -> Result<Vec<u8>, WnmError> {
        let mut key_data = self.keys.gtk_subelement(addr);
        if key_data.len() > MAX_GTK_SUBELEM_LEN {
            return Err(WnmError::KeyData(format!(
                "GTK subelement is {} bytes long",
                key_data.len()
            )));
        }
        debug!("WNM: gtk_len = {}", key_data.len());

        if self.keys.igtk_supported() {
            let igtk = self
                .keys
                .igtk_subelement(addr)
                .map_err(|err| WnmError::KeyData(format!("IGTK subelement: {err}")))?;
            if igtk.len() > MAX_IGTK_SUBELEM_LEN {
                return Err(WnmError::KeyData(format!(
                    "IGTK subelement is {} bytes long",
                    igtk.len()
                )));
            }
            debug!("WNM: igtk_len = {}", igtk.len());
            key_data.extend_from_slice(&igtk);
        }

        Ok(key_data)
    }

    fn set_station_sleeping(&mut self, addr: &MacAddress, sleeping: bool) {
        if let Some(sta) = self.stations.station_mut(addr) {
            sta.wnm_sleep = sleeping;
        }
    }

    fn confirm_sleep_oper(&mut self, oper: WnmOper, addr: &MacAddress) {
        if let Err(err) = self.driver.wnm_oper(oper, addr, &mut TfsBuffer::new()) {
            debug!("WNM: {oper} failed for {addr}: {err}");
        }
    }
}
