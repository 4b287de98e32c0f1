use libwifi::frame::components::MacAddress;

/// Everything that can go wrong while handling or sending WNM frames.
/// None of these are fatal for the access point, the offending frame is simply dropped.
#[derive(thiserror::Error, Debug)]
pub enum WnmError {
    /// Truncated or otherwise unusable frame content. No state has been touched.
    #[error("Malformed WNM frame: {0}")]
    Malformed(String),

    #[error(transparent)]
    Frame(#[from] libwifi::error::Error),

    /// Key material couldn't be added to a sleep mode response.
    #[error("Failed to build key data: {0}")]
    KeyData(String),

    #[error("Station {0} not found")]
    StationNotFound(MacAddress),

    /// The driver refused to send a frame. Station state is left as it was.
    #[error("Driver operation failed: {0}")]
    Driver(anyhow::Error),

    #[error("Session information URL is {0} bytes long, at most 255 are allowed")]
    UrlTooLong(usize),

    #[error("Unsupported WNM action {0}")]
    UnsupportedAction(u8),
}
