//! Error types for store-hours operations.
//!
//! [`evaluate`](crate::evaluate) never fails. These errors come from the
//! edges: loading a store configuration and resolving the wall clock.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreHoursError {
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid store configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreHoursError>;
