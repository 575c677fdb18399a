//! Configuration and logging for the nyla binary.
mod config;
pub mod utils;

pub use config::*;
