//! The availability engine.
//!
//! [`evaluate`] is a pure function of its inputs: no clock access, no I/O,
//! no state between calls. The caller supplies the store's local wall-clock
//! instant (see [`crate::clock`] for resolving it from a UTC instant).
//!
//! # Decision order
//!
//! Each step is terminal; the first match decides the verdict.
//!
//! 1. Manual flag off → closed (`manual`)
//! 2. A pause covers `now` → closed (`pause`), first match in list order
//! 3. Today has no usable hours → closed (`day_closed`)
//! 4. `open <= now <= close` by minute of day → open
//! 5. Otherwise → closed (`out_of_hours`), reporting today's opening time
//!
//! Step 4 compares minutes within a single day. It never rolls over
//! midnight, never looks ahead to tomorrow's opening time, and never
//! consults yesterday's hours. Overnight hours such as 20:00–02:00
//! therefore never read as open.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::lenient;
use crate::pause::{active_pause, ScheduledPause};
use crate::schedule::{minutes_since_midnight, ScheduleIssue, WeekSchedule};
use crate::status::StoreStatus;

/// Decide whether the store is open at `now`.
///
/// # Arguments
///
/// * `manual_open` — the merchant's master switch; `false` overrides everything
/// * `week` — the weekly trading hours
/// * `pauses` — scheduled closures, in priority order
/// * `now` — the store's local wall-clock instant
///
/// Never fails. Missing or malformed input resolves toward closed.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use store_hours::{evaluate, DaySchedule, WeekSchedule};
///
/// let week = WeekSchedule::new().with_day(Weekday::Fri, DaySchedule::open("08:00", "23:00"));
/// // 2026-02-20 is a Friday
/// let now = NaiveDate::from_ymd_opt(2026, 2, 20).unwrap().and_hms_opt(20, 0, 0).unwrap();
///
/// let status = evaluate(true, &week, &[], now);
/// assert!(status.is_open());
/// assert_eq!(status.message(), "Open until 23:00");
/// ```
pub fn evaluate(
    manual_open: bool,
    week: &WeekSchedule,
    pauses: &[ScheduledPause],
    now: NaiveDateTime,
) -> StoreStatus {
    let status = decide(manual_open, week, pauses, now);
    tracing::debug!(%now, status = %status, open = status.is_open(), "store status evaluated");
    status
}

fn decide(
    manual_open: bool,
    week: &WeekSchedule,
    pauses: &[ScheduledPause],
    now: NaiveDateTime,
) -> StoreStatus {
    if !manual_open {
        return StoreStatus::closed_manually();
    }

    if let Some(pause) = active_pause(pauses, now) {
        return StoreStatus::paused(&pause.name);
    }

    let Some((open, close)) = week.day(now.weekday()).and_then(|day| day.hours()) else {
        return StoreStatus::closed_today();
    };

    let current = minutes_since_midnight(now.time());
    if minutes_since_midnight(open) <= current && current <= minutes_since_midnight(close) {
        StoreStatus::open_until(close)
    } else {
        StoreStatus::opens_at(open)
    }
}

// ── StoreConfig ─────────────────────────────────────────────────────────────

/// The persisted availability settings of one store.
///
/// Mirrors the admin payload:
///
/// ```json
/// {
///   "isOpen": true,
///   "schedule": { "week": { "friday": { "isOpen": true, "openTime": "08:00", "closeTime": "23:00" } } },
///   "pauses": [ { "name": "Natal", "startDate": "2025-12-24", "endDate": "2025-12-26" } ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// The manual open/closed flag. A payload without it reads as closed.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_open: bool,
    #[serde(default, deserialize_with = "lenient::entry_or_default")]
    pub schedule: Schedule,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub pauses: Vec<ScheduledPause>,
}

/// Wrapper matching the `schedule.week` nesting of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default, deserialize_with = "lenient::entry_or_default")]
    pub week: WeekSchedule,
}

/// A problem found by [`StoreConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    Schedule(ScheduleIssue),
    /// A pause whose dates cannot be parsed; it never takes effect.
    MalformedPause { name: String, detail: String },
    /// A pause ending before it starts; it never takes effect.
    EmptyPause { name: String },
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigIssue::Schedule(issue) => write!(f, "{}", issue),
            ConfigIssue::MalformedPause { name, detail } => {
                write!(f, "pause '{}': {} (ignored)", name, detail)
            }
            ConfigIssue::EmptyPause { name } => {
                write!(f, "pause '{}': ends before it starts (ignored)", name)
            }
        }
    }
}

impl StoreConfig {
    /// Parse a config from its JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`StoreHoursError::InvalidConfig`](crate::StoreHoursError::InvalidConfig)
    /// if the payload is not valid JSON or not a JSON object. Malformed days
    /// and pauses inside it are kept as closed days and pauses that never
    /// match; [`validate`](Self::validate) reports them.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// [`evaluate`] with this config's flag, week and pauses.
    pub fn evaluate(&self, now: NaiveDateTime) -> StoreStatus {
        evaluate(self.is_open, &self.schedule.week, &self.pauses, now)
    }

    /// Everything in the config that evaluation silently treats as closed
    /// or ignores.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues: Vec<ConfigIssue> = self
            .schedule
            .week
            .validate()
            .into_iter()
            .map(ConfigIssue::Schedule)
            .collect();

        for pause in &self.pauses {
            match pause.try_window() {
                Ok((start, end)) if end < start => issues.push(ConfigIssue::EmptyPause {
                    name: pause.name.clone(),
                }),
                Ok(_) => {}
                Err(e) => issues.push(ConfigIssue::MalformedPause {
                    name: pause.name.clone(),
                    detail: e.to_string(),
                }),
            }
        }
        issues
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
