use thiserror::Error;

/// Problems with the command line that stop a run before anything is read or written.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown timezone '{0}'. Use format like 'America/Chicago'")]
    UnknownTimezone(String),

    #[error("Invalid time range: start ({start}) and end ({end}) must be numbers")]
    InvalidWindow { start: f64, end: f64 },

    #[error(
        "Frames per image is too small, this means your duration or fps need to increase. Right now, you have {frames} frames per image"
    )]
    FramesPerImageTooSmall { frames: f64 },
}
