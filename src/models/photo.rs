use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single geotagged capture.
///
/// `(0.0, 0.0)` coordinates mean the device never obtained a location fix.
/// The pair is kept as-is rather than folded into an `Option` so records
/// written by older clients stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub uri: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Photo {
    pub fn from_capture(
        event: &CaptureEvent,
        location_name: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            uri: event.uri.clone(),
            latitude: event.latitude,
            longitude: event.longitude,
            timestamp: event.timestamp,
            location_name,
            description,
        }
    }

    pub fn has_fix(&self) -> bool {
        has_fix(self.latitude, self.longitude)
    }
}

/// What the camera or gallery hands over when a picture is taken.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureEvent {
    pub uri: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
}

impl CaptureEvent {
    pub fn has_fix(&self) -> bool {
        has_fix(self.latitude, self.longitude)
    }
}

fn has_fix(latitude: f64, longitude: f64) -> bool {
    !(latitude == 0.0 && longitude == 0.0)
}

/// Render coordinates as "48.8566, 2.3522", or a dash when there was no fix.
pub fn format_coords(latitude: f64, longitude: f64) -> String {
    if has_fix(latitude, longitude) {
        format!("{:.4}, {:.4}", latitude, longitude)
    } else {
        "—".to_string()
    }
}
