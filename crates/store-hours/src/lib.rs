//! # store-hours
//!
//! Deterministic store availability for storefronts and merchant dashboards.
//!
//! Given a weekly trading schedule, a list of scheduled pauses, a manual
//! open/closed flag and the current local instant, decide whether a store is
//! open, and if not, why and when it opens. Evaluation is pure and total:
//! malformed input resolves toward closed, never toward an error.
//!
//! ## Modules
//!
//! - [`engine`] — [`evaluate`] and the persisted [`StoreConfig`] shape
//! - [`schedule`] — Weekly trading hours per weekday
//! - [`pause`] — Dated closure windows (holidays, vacations)
//! - [`status`] — The [`StoreStatus`] verdict
//! - [`clock`] — UTC instant → store-local wall clock
//! - [`error`] — Error types

pub mod clock;
pub mod engine;
pub mod error;
mod lenient;
pub mod pause;
pub mod schedule;
pub mod status;

pub use engine::{evaluate, ConfigIssue, Schedule, StoreConfig};
pub use error::StoreHoursError;
pub use pause::{active_pause, ScheduledPause};
pub use schedule::{DaySchedule, ScheduleIssue, WeekSchedule};
pub use status::{ClosedReason, StoreStatus};
