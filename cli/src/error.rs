use std::io;

use netcam::NetcamError;

/// Errors that end the `netcam` binary
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Netcam(#[from] NetcamError),

    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to initialise logging: {0}")]
    Logger(#[from] log::SetLoggerError),

    /// A one-shot command reached the server but did not succeed
    #[error("{0}")]
    CommandFailed(String),
}

pub type CliResult<T> = Result<T, CliError>;
