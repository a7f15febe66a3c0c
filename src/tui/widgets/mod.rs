pub mod calendar;
pub mod day_photos;
pub mod header;
pub mod places;
pub mod statusbar;
