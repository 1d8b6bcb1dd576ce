//! Resolving the store's local wall clock.
//!
//! [`evaluate`](crate::evaluate) takes a local instant and never reads the
//! system clock. These helpers sit at the outermost call site: they take an
//! explicit UTC instant (typically `Utc::now()`) and the store's IANA
//! timezone, and produce the wall-clock time the schedule is written in.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::engine::StoreConfig;
use crate::error::{Result, StoreHoursError};
use crate::status::StoreStatus;

/// Convert a UTC instant to local wall-clock time in `timezone`.
///
/// # Errors
///
/// Returns [`StoreHoursError::InvalidTimezone`] if `timezone` is not a valid
/// IANA timezone name.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use store_hours::clock::local_now;
///
/// let utc = Utc.with_ymd_and_hms(2025, 12, 25, 15, 0, 0).unwrap();
/// let local = local_now(utc, "America/Sao_Paulo").unwrap();
/// assert_eq!(local.to_string(), "2025-12-25 12:00:00");
/// ```
pub fn local_now(utc: DateTime<Utc>, timezone: &str) -> Result<NaiveDateTime> {
    let tz = parse_timezone(timezone)?;
    Ok(utc.with_timezone(&tz).naive_local())
}

/// Evaluate `config` at the UTC instant `utc`, as seen from `timezone`.
///
/// # Errors
///
/// Returns [`StoreHoursError::InvalidTimezone`] if `timezone` is not a valid
/// IANA timezone name.
pub fn evaluate_at_utc(
    config: &StoreConfig,
    utc: DateTime<Utc>,
    timezone: &str,
) -> Result<StoreStatus> {
    Ok(config.evaluate(local_now(utc, timezone)?))
}

/// Parse a local `YYYY-MM-DDTHH:MM[:SS]` datetime (a space separator also works).
///
/// # Errors
///
/// Returns [`StoreHoursError::InvalidDatetime`] if none of the accepted
/// formats match.
pub fn parse_local_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| StoreHoursError::InvalidDatetime(format!("'{}'", s)))
}

/// Parse an IANA timezone string into `Tz`.
fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| StoreHoursError::InvalidTimezone(format!("'{}'", s)))
}
