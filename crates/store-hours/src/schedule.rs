//! Weekly trading hours.
//!
//! A [`WeekSchedule`] maps each weekday to a [`DaySchedule`]. Times are kept
//! as the `HH:MM` strings the admin panel persists and are parsed lazily, so
//! a malformed entry only closes its own day instead of rejecting the whole
//! schedule.
//!
//! The payload shape matches the storefront REST layer:
//!
//! ```json
//! { "friday": { "isOpen": true, "openTime": "08:00", "closeTime": "23:00" } }
//! ```

use std::fmt;

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreHoursError};
use crate::lenient;

/// Weekdays in storage order, Sunday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

// ── DaySchedule ─────────────────────────────────────────────────────────────

/// Trading hours for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    /// Whether the store trades at all on this weekday.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_open: bool,
    /// Opening time, `HH:MM` (24h). Ignored when `is_open` is false.
    #[serde(default, deserialize_with = "lenient::string")]
    pub open_time: String,
    /// Closing time, `HH:MM` (24h). Ignored when `is_open` is false.
    #[serde(default, deserialize_with = "lenient::string")]
    pub close_time: String,
}

impl DaySchedule {
    /// A trading day open from `open` to `close`.
    pub fn open(open: &str, close: &str) -> Self {
        Self {
            is_open: true,
            open_time: open.to_string(),
            close_time: close.to_string(),
        }
    }

    /// A non-trading day.
    pub fn closed() -> Self {
        Self::default()
    }

    /// Parsed `(open, close)` hours.
    ///
    /// Returns `None` when the day does not trade or either time is
    /// malformed. The evaluation path only ever uses this lenient form.
    pub fn hours(&self) -> Option<(NaiveTime, NaiveTime)> {
        match self.try_hours() {
            Ok(hours) => hours,
            Err(e) => {
                tracing::warn!(error = %e, "malformed trading hours, treating day as closed");
                None
            }
        }
    }

    /// Strict form of [`hours`](Self::hours).
    ///
    /// # Errors
    ///
    /// Returns [`StoreHoursError::InvalidTime`] if the day trades and either
    /// time is not a well-formed `HH:MM` string.
    pub fn try_hours(&self) -> Result<Option<(NaiveTime, NaiveTime)>> {
        if !self.is_open {
            return Ok(None);
        }
        let open = parse_hhmm(&self.open_time).ok_or_else(|| {
            StoreHoursError::InvalidTime(format!("openTime '{}'", self.open_time))
        })?;
        let close = parse_hhmm(&self.close_time).ok_or_else(|| {
            StoreHoursError::InvalidTime(format!("closeTime '{}'", self.close_time))
        })?;
        Ok(Some((open, close)))
    }
}

// ── WeekSchedule ────────────────────────────────────────────────────────────

/// The recurring Sunday–Saturday trading-hours table of a store.
///
/// Every day is optional on the wire; a missing, `null` or non-object day
/// reads as closed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeekSchedule {
    #[serde(
        default,
        deserialize_with = "lenient::entry",
        skip_serializing_if = "Option::is_none"
    )]
    pub sunday: Option<DaySchedule>,
    #[serde(
        default,
        deserialize_with = "lenient::entry",
        skip_serializing_if = "Option::is_none"
    )]
    pub monday: Option<DaySchedule>,
    #[serde(
        default,
        deserialize_with = "lenient::entry",
        skip_serializing_if = "Option::is_none"
    )]
    pub tuesday: Option<DaySchedule>,
    #[serde(
        default,
        deserialize_with = "lenient::entry",
        skip_serializing_if = "Option::is_none"
    )]
    pub wednesday: Option<DaySchedule>,
    #[serde(
        default,
        deserialize_with = "lenient::entry",
        skip_serializing_if = "Option::is_none"
    )]
    pub thursday: Option<DaySchedule>,
    #[serde(
        default,
        deserialize_with = "lenient::entry",
        skip_serializing_if = "Option::is_none"
    )]
    pub friday: Option<DaySchedule>,
    #[serde(
        default,
        deserialize_with = "lenient::entry",
        skip_serializing_if = "Option::is_none"
    )]
    pub saturday: Option<DaySchedule>,
}

impl WeekSchedule {
    /// An empty schedule: every day missing, so every day reads as closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// The same hours on all seven days.
    pub fn every_day(day: DaySchedule) -> Self {
        let mut week = Self::new();
        for weekday in WEEKDAYS {
            week.set_day(weekday, day.clone());
        }
        week
    }

    /// Builder form of [`set_day`](Self::set_day).
    pub fn with_day(mut self, weekday: Weekday, day: DaySchedule) -> Self {
        self.set_day(weekday, day);
        self
    }

    pub fn set_day(&mut self, weekday: Weekday, day: DaySchedule) {
        *self.slot_mut(weekday) = Some(day);
    }

    /// The entry for `weekday`, if one was configured.
    pub fn day(&self, weekday: Weekday) -> Option<&DaySchedule> {
        match weekday {
            Weekday::Sun => self.sunday.as_ref(),
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
        }
    }

    fn slot_mut(&mut self, weekday: Weekday) -> &mut Option<DaySchedule> {
        match weekday {
            Weekday::Sun => &mut self.sunday,
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
        }
    }

    /// Check the schedule the way the admin panel should before saving it.
    ///
    /// Evaluation never calls this; it tolerates everything reported here by
    /// reading the affected day as closed.
    pub fn validate(&self) -> Vec<ScheduleIssue> {
        let mut issues = Vec::new();
        for weekday in WEEKDAYS {
            let Some(day) = self.day(weekday) else {
                issues.push(ScheduleIssue::MissingDay(weekday));
                continue;
            };
            match day.try_hours() {
                Ok(Some((open, close))) if open > close => {
                    issues.push(ScheduleIssue::OvernightHours {
                        weekday,
                        open: format_hhmm(open),
                        close: format_hhmm(close),
                    });
                }
                Ok(Some((open, close))) if open == close => {
                    issues.push(ScheduleIssue::SingleMinute {
                        weekday,
                        at: format_hhmm(open),
                    });
                }
                Ok(_) => {}
                Err(e) => issues.push(ScheduleIssue::MalformedHours {
                    weekday,
                    detail: e.to_string(),
                }),
            }
        }
        issues
    }
}

/// A problem found by [`WeekSchedule::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleIssue {
    MissingDay(Weekday),
    MalformedHours { weekday: Weekday, detail: String },
    /// Close time before open time. Same-day comparison cannot express
    /// hours that run past midnight.
    OvernightHours {
        weekday: Weekday,
        open: String,
        close: String,
    },
    /// Open and close time are equal; the day reads as open for that one
    /// minute only.
    SingleMinute { weekday: Weekday, at: String },
}

impl fmt::Display for ScheduleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleIssue::MissingDay(weekday) => {
                write!(f, "{}: no schedule entry (treated as closed)", weekday_name(*weekday))
            }
            ScheduleIssue::MalformedHours { weekday, detail } => {
                write!(f, "{}: {} (treated as closed)", weekday_name(*weekday), detail)
            }
            ScheduleIssue::OvernightHours {
                weekday,
                open,
                close,
            } => write!(
                f,
                "{}: closes at {} but opens at {}; hours past midnight are not supported",
                weekday_name(*weekday),
                close,
                open
            ),
            ScheduleIssue::SingleMinute { weekday, at } => write!(
                f,
                "{}: opens and closes at {}; open for that minute only",
                weekday_name(*weekday),
                at
            ),
        }
    }
}

// ── Time helpers ────────────────────────────────────────────────────────────

/// Parse a 24-hour `HH:MM` string. Surrounding whitespace is ignored.
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

/// Format a time as `HH:MM`.
pub fn format_hhmm(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Minutes elapsed since 00:00. Seconds are truncated.
pub fn minutes_since_midnight(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Lowercase English weekday name, as used for the schedule keys.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "sunday",
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
    }
}

/// `HH:MM` (de)serialization for [`NaiveTime`] fields.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_hhmm(*t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_hhmm(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid HH:MM time '{raw}'")))
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(t: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
            match t {
                Some(t) => super::serialize(t, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
            match Option::<String>::deserialize(d)? {
                Some(raw) => super::super::parse_hhmm(&raw).map(Some).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid HH:MM time '{raw}'"))
                }),
                None => Ok(None),
            }
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_parse_hhmm_valid() {
        assert_eq!(parse_hhmm("08:00"), Some(t(8, 0)));
        assert_eq!(parse_hhmm("23:59"), Some(t(23, 59)));
        assert_eq!(parse_hhmm(" 07:30 "), Some(t(7, 30)));
    }

    #[test]
    fn test_parse_hhmm_rejects_garbage() {
        assert_eq!(parse_hhmm(""), None);
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("8am"), None);
        assert_eq!(parse_hhmm("12:60"), None);
    }

    #[test]
    fn test_minutes_since_midnight_truncates_seconds() {
        assert_eq!(minutes_since_midnight(t(0, 0)), 0);
        assert_eq!(minutes_since_midnight(t(22, 0)), 1320);
        let late = NaiveTime::from_hms_opt(22, 0, 59).unwrap();
        assert_eq!(minutes_since_midnight(late), 1320);
    }

    #[test]
    fn test_hours_closed_day_is_none() {
        let day = DaySchedule {
            is_open: false,
            open_time: "08:00".to_string(),
            close_time: "22:00".to_string(),
        };
        assert_eq!(day.hours(), None);
        assert!(day.try_hours().unwrap().is_none());
    }

    #[test]
    fn test_hours_malformed_fails_closed() {
        let day = DaySchedule::open("8h", "22:00");
        assert_eq!(day.hours(), None);
        assert!(matches!(
            day.try_hours(),
            Err(StoreHoursError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_week_lookup_by_weekday() {
        let week = WeekSchedule::new().with_day(Weekday::Fri, DaySchedule::open("08:00", "23:00"));
        assert_eq!(week.day(Weekday::Fri).and_then(|d| d.hours()), Some((t(8, 0), t(23, 0))));
        assert!(week.day(Weekday::Sat).is_none());
    }

    #[test]
    fn test_week_deserializes_rest_payload() {
        let json = r#"{
            "friday": { "isOpen": true, "openTime": "08:00", "closeTime": "23:00" },
            "saturday": { "isOpen": false }
        }"#;
        let week: WeekSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(week.friday, Some(DaySchedule::open("08:00", "23:00")));
        assert_eq!(week.saturday, Some(DaySchedule::closed()));
        assert!(week.monday.is_none());
    }

    #[test]
    fn test_validate_clean_week() {
        let week = WeekSchedule::every_day(DaySchedule::open("08:00", "22:00"))
            .with_day(Weekday::Sun, DaySchedule::closed());
        assert!(week.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_each_problem() {
        let mut week = WeekSchedule::every_day(DaySchedule::open("08:00", "22:00"));
        week.monday = None;
        week.set_day(Weekday::Tue, DaySchedule::open("nine", "22:00"));
        week.set_day(Weekday::Fri, DaySchedule::open("20:00", "02:00"));

        let issues = week.validate();
        assert_eq!(issues.len(), 3);
        assert_eq!(issues[0], ScheduleIssue::MissingDay(Weekday::Mon));
        assert!(matches!(
            issues[1],
            ScheduleIssue::MalformedHours { weekday: Weekday::Tue, .. }
        ));
        assert_eq!(
            issues[2],
            ScheduleIssue::OvernightHours {
                weekday: Weekday::Fri,
                open: "20:00".to_string(),
                close: "02:00".to_string(),
            }
        );
        assert!(issues[2].to_string().contains("past midnight"));
    }

    #[test]
    fn test_validate_equal_times_not_overnight() {
        let week = WeekSchedule::every_day(DaySchedule::open("08:00", "22:00"))
            .with_day(Weekday::Wed, DaySchedule::open("12:00", "12:00"));

        let issues = week.validate();
        assert_eq!(
            issues,
            vec![ScheduleIssue::SingleMinute {
                weekday: Weekday::Wed,
                at: "12:00".to_string(),
            }]
        );
        assert!(!issues[0].to_string().contains("past midnight"));
    }

    #[test]
    fn test_day_tolerates_null_and_wrong_types() {
        let json = r#"{
            "friday": { "isOpen": true, "openTime": 800, "closeTime": "23:00" },
            "saturday": { "isOpen": false, "openTime": null, "closeTime": null },
            "sunday": { "isOpen": null },
            "monday": "closed",
            "tuesday": null
        }"#;
        let week: WeekSchedule = serde_json::from_str(json).unwrap();

        let friday = week.day(Weekday::Fri).unwrap();
        assert_eq!(friday.open_time, "800");
        assert_eq!(friday.hours(), None);
        assert_eq!(week.saturday, Some(DaySchedule::closed()));
        assert_eq!(week.sunday, Some(DaySchedule::closed()));
        assert!(week.monday.is_none());
        assert!(week.tuesday.is_none());

        let issues = week.validate();
        assert!(issues.contains(&ScheduleIssue::MissingDay(Weekday::Mon)));
        assert!(issues.iter().any(|i| matches!(
            i,
            ScheduleIssue::MalformedHours { weekday: Weekday::Fri, .. }
        )));
    }
}
