//! Coordinate validation for map placement.
//!
//! A record is drawable only if both `lat` and `lng` coerce to finite
//! numbers. Records without a point still belong to the working set and
//! show up in the list; they are only left off the map and out of the
//! centroid.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::RawProvider;

/// Validated WGS84 position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Extract the map point of a record, if it has a usable one
pub fn project(record: &RawProvider) -> Option<GeoPoint> {
    let lat = coerce_coordinate(record.lat.as_ref()?)?;
    let lng = coerce_coordinate(record.lng.as_ref()?)?;
    Some(GeoPoint { lat, lng })
}

/// Coerce a JSON value to a finite coordinate.
///
/// Accepts numbers and numeric strings (surrounding whitespace ignored).
/// Rejects `null`, booleans, arrays, objects, empty strings and anything
/// that parses to `NaN` or an infinity.
pub fn coerce_coordinate(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };

    n.is_finite().then_some(n)
}
