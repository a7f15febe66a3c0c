pub mod location;
pub mod photo;
pub mod stats;

pub use location::{sort_by_name, Location};
pub use photo::{CaptureEvent, Photo};
pub use stats::{JournalExport, PhotoStats, WeeklyProgress};
