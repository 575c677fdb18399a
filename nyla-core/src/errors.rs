use thiserror::Error;

pub type Result<T> = std::result::Result<T, NylaError>;

#[derive(Debug, Error)]
pub enum NylaError {
    #[error("another window manager is already running")]
    AlreadyRunning,
    #[error("Display server error: {0}")]
    DisplayServer(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
