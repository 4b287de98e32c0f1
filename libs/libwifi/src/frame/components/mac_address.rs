use std::fmt;

/// This is our representation of a MAC-address
///
/// ```
/// use libwifi::frame::components::MacAddress;
///
/// let address = MacAddress([255, 255, 255, 255, 255, 255]);
/// println!("{}", address.is_broadcast());
/// // -> true
/// ```
///
#[derive(Clone, Debug, Eq, PartialEq, Copy, Ord, PartialOrd, Hash, Default)]
pub struct MacAddress(pub [u8; 6]);

/// Length of a MAC address (and a BSSID) on the wire.
pub const ETH_ALEN: usize = 6;

impl MacAddress {
    pub fn broadcast() -> Self {
        MacAddress([255, 255, 255, 255, 255, 255])
    }

    pub fn zeroed() -> Self {
        MacAddress([0, 0, 0, 0, 0, 0])
    }

    /// Encode mac address for network.
    pub fn encode(&self) -> [u8; 6] {
        self.0
    }

    /// Check if this is a multicast address
    pub fn is_mcast(&self) -> bool {
        self.0[0] % 2 == 1
    }

    /// Check whether this MAC addresses the whole network.
    pub fn is_broadcast(&self) -> bool {
        self.0 == [255, 255, 255, 255, 255, 255]
    }

    /// Stations are always individually addressed. Anything else can't own a WNM session.
    pub fn is_real_device(&self) -> bool {
        !(self.is_broadcast() || self.is_mcast() || self.0 == [0; 6])
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5],
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MacParseError {
    InvalidDigit,
    InvalidLength,
}

impl fmt::Display for MacParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacParseError::InvalidDigit => write!(f, "Invalid hex digit in mac address"),
            MacParseError::InvalidLength => write!(f, "A mac address needs exactly 6 octets"),
        }
    }
}

impl std::error::Error for MacParseError {}

impl std::str::FromStr for MacAddress {
    type Err = MacParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut array = [0u8; 6];

        let input_lower = input.to_lowercase();
        // Check if the input contains colons, and split accordingly
        let bytes: Vec<&str> = if input_lower.contains(':') {
            input_lower.split(':').collect()
        } else if input.contains('-') {
            input_lower.split('-').collect()
        } else if input_lower.len() == 12 {
            // If the input doesn't contain colons and is 12 characters long
            input_lower
                .as_bytes()
                .chunks(2)
                .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
                .collect()
        } else {
            return Err(MacParseError::InvalidLength);
        };

        // Validate the number of bytes
        if bytes.len() != 6 {
            return Err(MacParseError::InvalidLength);
        }

        // Parse each byte
        for (count, byte) in bytes.iter().enumerate() {
            if byte.len() != 2 {
                return Err(MacParseError::InvalidDigit);
            }
            array[count] = u8::from_str_radix(byte, 16).map_err(|_| MacParseError::InvalidDigit)?;
        }

        Ok(MacAddress(array))
    }
}
