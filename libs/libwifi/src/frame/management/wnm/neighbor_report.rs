use super::WLAN_EID_NEIGHBOR_REPORT;
use crate::error::Error;
use crate::frame::components::*;
use crate::frame::writer::FrameWriter;

/// The AP is known to be reachable (both bits of the 2 bit field set).
pub const NEI_REP_BSSID_INFO_AP_REACHABLE: u32 = 0x03;
/// The AP supports the same security as the current one.
pub const NEI_REP_BSSID_INFO_SECURITY: u32 = 0x04;

/// Subelement id of the BSS transition candidate preference.
pub const WNM_NEIGHBOR_BSS_TRANSITION_CANDIDATE: u8 = 3;

/// Length of the fixed neighbor report fields: bssid, bssid info, operating class,
/// channel and phy type.
pub const NEIGHBOR_REPORT_FIXED_LEN: usize = 13;

/// A Neighbor Report element as carried in BSS transition candidate lists.
///
/// - 1 byte: Element id (52)
/// - 1 byte: Length
/// - 6 bytes: BSSID
/// - 4 bytes: BSSID information (little endian)
/// - 1 byte: Operating class
/// - 1 byte: Channel number
/// - 1 byte: PHY type
/// - Optional subelements
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborReport {
    pub bssid: MacAddress,
    pub bssid_info: u32,
    pub operating_class: u8,
    pub channel: u8,
    pub phy_type: u8,
    pub subelements: Vec<(u8, Vec<u8>)>,
}

impl NeighborReport {
    /// A single reachable, secured candidate with a preference subelement.
    /// Preference 255 is the most preferred, 0 is reserved.
    pub fn candidate(bssid: MacAddress, operating_class: u8, channel: u8, preference: u8) -> Self {
        NeighborReport {
            bssid,
            bssid_info: NEI_REP_BSSID_INFO_AP_REACHABLE | NEI_REP_BSSID_INFO_SECURITY,
            operating_class,
            channel,
            phy_type: 0,
            subelements: vec![(WNM_NEIGHBOR_BSS_TRANSITION_CANDIDATE, vec![preference])],
        }
    }

    /// The candidate preference, if the report carries one.
    pub fn preference(&self) -> Option<u8> {
        self.subelements
            .iter()
            .find(|(id, body)| *id == WNM_NEIGHBOR_BSS_TRANSITION_CANDIDATE && !body.is_empty())
            .map(|(_, body)| body[0])
    }

    fn body_len(&self) -> usize {
        let subelements: usize = self
            .subelements
            .iter()
            .map(|(_, body)| 2 + body.len())
            .sum();

        NEIGHBOR_REPORT_FIXED_LEN + subelements
    }

    /// Size of the whole element, including its two byte header.
    pub fn encoded_len(&self) -> usize {
        2 + self.body_len()
    }

    pub fn write(&self, writer: &mut FrameWriter) -> Result<(), Error> {
        let body_len = self.body_len();
        let len = u8::try_from(body_len).map_err(|_| Error::ElementTooLong {
            id: WLAN_EID_NEIGHBOR_REPORT,
            len: body_len,
        })?;

        writer.put_u8(WLAN_EID_NEIGHBOR_REPORT)?;
        writer.put_u8(len)?;
        writer.put_mac(&self.bssid)?;
        writer.put_u32(self.bssid_info)?;
        writer.put_u8(self.operating_class)?;
        writer.put_u8(self.channel)?;
        writer.put_u8(self.phy_type)?;
        for (id, body) in self.subelements.iter() {
            writer.put_element(*id, body)?;
        }

        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        let mut writer = FrameWriter::with_limit(self.encoded_len());
        self.write(&mut writer)?;

        Ok(writer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_layout() {
        let bssid = MacAddress([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        let report = NeighborReport::candidate(bssid, 81, 6, 255);

        let encoded = report.encode().unwrap();
        assert_eq!(
            encoded,
            vec![
                52, 16, // Element header
                0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff, // BSSID
                0x07, 0, 0, 0,  // BSSID info
                81, // Operating class
                6,  // Channel
                0,  // PHY type
                3, 1, 255, // Candidate preference
            ]
        );
        assert_eq!(report.encoded_len(), 18);
        assert_eq!(report.preference(), Some(255));
    }

    #[test]
    fn test_oversized_report() {
        let mut report = NeighborReport::candidate(MacAddress::zeroed(), 0, 1, 1);
        report.subelements.push((221, vec![0; 250]));

        assert!(matches!(
            report.encode(),
            Err(Error::ElementTooLong { id: 52, .. })
        ));
    }
}
