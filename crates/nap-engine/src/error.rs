//! Error types for nap-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NapError {
    /// A wall-clock time string did not match `HH:MM` or `HH:MM:SS`.
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    /// A UTC offset string did not match `±HH:MM`.
    #[error("Invalid UTC offset: {0}")]
    InvalidOffset(String),
}

pub type Result<T> = std::result::Result<T, NapError>;
