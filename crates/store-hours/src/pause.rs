//! Scheduled pauses: dated closure windows such as holidays or vacations.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreHoursError};
use crate::lenient;

/// A named closure window covering whole calendar days.
///
/// Missing, `null` or non-string fields deserialize as unusable text; such a
/// pause never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPause {
    /// Shown to customers as the closure reason.
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    /// First closed day, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub start_date: String,
    /// Last closed day (inclusive), `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub end_date: String,
}

impl ScheduledPause {
    pub fn new(name: &str, start_date: &str, end_date: &str) -> Self {
        Self {
            name: name.to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        }
    }

    /// The covered span, `[start_date 00:00:00, end_date 23:59:59]`.
    ///
    /// Returns `None` if either date is unparseable.
    pub fn window(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match self.try_window() {
            Ok(window) => Some(window),
            Err(e) => {
                tracing::warn!(pause = %self.name, error = %e, "ignoring pause with unparseable dates");
                None
            }
        }
    }

    /// Strict form of [`window`](Self::window).
    ///
    /// # Errors
    ///
    /// Returns [`StoreHoursError::InvalidDate`] if either date is not a
    /// well-formed `YYYY-MM-DD` string.
    pub fn try_window(&self) -> Result<(NaiveDateTime, NaiveDateTime)> {
        let start = parse_date(&self.start_date)?;
        let end = parse_date(&self.end_date)?;
        Ok((start.and_time(NaiveTime::MIN), end.and_time(end_of_day())))
    }

    /// Whether `now` falls inside the window, both ends inclusive.
    ///
    /// A pause with unparseable dates never matches.
    pub fn contains(&self, now: NaiveDateTime) -> bool {
        self.window()
            .is_some_and(|(start, end)| start <= now && now <= end)
    }
}

/// The first pause in list order whose window contains `now`.
pub fn active_pause(pauses: &[ScheduledPause], now: NaiveDateTime) -> Option<&ScheduledPause> {
    pauses.iter().find(|p| p.contains(now))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| StoreHoursError::InvalidDate(format!("'{}': {}", s, e)))
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}
