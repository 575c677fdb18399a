//! Error handling and reporting for this backend

use nyla_core::NylaError;
use thiserror::Error;
use x11rb::errors::{ConnectError, ConnectionError, ParseError, ReplyError, ReplyOrIdError};

pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("another window manager is already running")]
    AlreadyRunning,

    #[error("Value out of range for the X11 protocol: {0}")]
    OutOfRange(#[from] std::num::TryFromIntError),

    #[error("Unable to watch the X11 socket: {0}")]
    Io(#[from] std::io::Error),

    // Errors from x11rb
    #[error("Unable to connect to the X server: {0}")]
    ConnectError(#[from] ConnectError),

    #[error("Connection error occured: {0}")]
    ConnectionError(#[from] ConnectionError),

    #[error("Unable to parse reply: {0}")]
    ParseError(#[from] ParseError),

    #[error("Unable to parse reply: {0}")]
    ReplyError(#[from] ReplyError),

    #[error("Unable to parse reply: {0}")]
    ReplyOrIdError(#[from] ReplyOrIdError),
}

impl From<Error> for NylaError {
    fn from(err: Error) -> Self {
        match err {
            Error::AlreadyRunning => Self::AlreadyRunning,
            err => Self::DisplayServer(err.to_string()),
        }
    }
}
