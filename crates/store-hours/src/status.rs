//! The availability verdict.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::schedule::{format_hhmm, hhmm};

/// Why a store is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosedReason {
    /// The merchant switched the store off.
    Manual,
    /// A scheduled pause covers the current instant.
    Pause,
    /// Today is not a trading day (or has no usable hours).
    DayClosed,
    /// Today trades, but not at this time of day.
    OutOfHours,
}

impl ClosedReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ClosedReason::Manual => "manual",
            ClosedReason::Pause => "pause",
            ClosedReason::DayClosed => "day_closed",
            ClosedReason::OutOfHours => "out_of_hours",
        }
    }
}

impl fmt::Display for ClosedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a store is open, and the message to show for it.
///
/// Serializes with a `status` discriminator:
///
/// ```json
/// {"status":"open","message":"Open until 23:00","closesAt":"23:00"}
/// {"status":"closed","message":"Opens at 08:00","reason":"out_of_hours","opensAt":"08:00"}
/// {"status":"closed","message":"Closed today","reason":"day_closed"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StoreStatus {
    #[serde(rename_all = "camelCase")]
    Open {
        message: String,
        #[serde(with = "hhmm")]
        closes_at: NaiveTime,
    },
    #[serde(rename_all = "camelCase")]
    Closed {
        message: String,
        reason: ClosedReason,
        #[serde(default, with = "hhmm::option", skip_serializing_if = "Option::is_none")]
        opens_at: Option<NaiveTime>,
    },
}

impl StoreStatus {
    pub(crate) fn open_until(closes_at: NaiveTime) -> Self {
        StoreStatus::Open {
            message: format!("Open until {}", format_hhmm(closes_at)),
            closes_at,
        }
    }

    pub(crate) fn closed_manually() -> Self {
        StoreStatus::Closed {
            message: "Store closed manually".to_string(),
            reason: ClosedReason::Manual,
            opens_at: None,
        }
    }

    pub(crate) fn paused(name: &str) -> Self {
        StoreStatus::Closed {
            message: format!("Pause: {}", name),
            reason: ClosedReason::Pause,
            opens_at: None,
        }
    }

    pub(crate) fn closed_today() -> Self {
        StoreStatus::Closed {
            message: "Closed today".to_string(),
            reason: ClosedReason::DayClosed,
            opens_at: None,
        }
    }

    pub(crate) fn opens_at(opens_at: NaiveTime) -> Self {
        StoreStatus::Closed {
            message: format!("Opens at {}", format_hhmm(opens_at)),
            reason: ClosedReason::OutOfHours,
            opens_at: Some(opens_at),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, StoreStatus::Open { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            StoreStatus::Open { message, .. } | StoreStatus::Closed { message, .. } => message,
        }
    }

    /// The closure reason, or `None` when open.
    pub fn reason(&self) -> Option<ClosedReason> {
        match self {
            StoreStatus::Open { .. } => None,
            StoreStatus::Closed { reason, .. } => Some(*reason),
        }
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
