//! Weekly visit tracking and day-bucketed photo queries.
//!
//! Everything here is a pure function over in-memory values; loading and
//! saving is the caller's job.

pub mod photo_index;
pub mod week;
pub mod zone;

pub use photo_index::{index_by_date, month_grid, photos_on_date, stats_for, MonthGrid};
pub use week::{new_location, record_visit, weekly_progress};
pub use zone::{JournalZone, LocalZone};
