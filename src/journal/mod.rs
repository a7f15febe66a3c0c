pub mod service;

pub use service::{CaptureRequest, Journal, VisitOutcome};
