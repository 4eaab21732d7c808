//! Map viewport estimation.
//!
//! The viewport is derived from the working set and never edited by hand:
//!
//! - no mappable items: a fixed fallback center over the DACH region at a
//!   regional zoom
//! - otherwise: the plain arithmetic mean of all latitudes and longitudes
//!   (no area weighting, no geodesics) at a neighborhood zoom
//!
//! Points are summed in a canonical order so the result does not depend on
//! the order the service returned the rows in.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::types::ProviderItem;

/// Where the map should be centered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

impl Viewport {
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Fixed viewport parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportSettings {
    /// Center used when nothing can be placed on the map
    pub fallback_center: GeoPoint,
    /// Coarse zoom for the fallback center
    pub fallback_zoom: u8,
    /// Zoom used when centering on the working set
    pub neighborhood_zoom: u8,
    /// Duration of the fly transition between viewports
    pub fly_duration: Duration,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            fallback_center: GeoPoint::new(47.5, 9.5),
            fallback_zoom: 6,
            neighborhood_zoom: 11,
            fly_duration: Duration::from_millis(600),
        }
    }
}

impl ViewportSettings {
    pub fn fallback(&self) -> Viewport {
        Viewport {
            lat: self.fallback_center.lat,
            lng: self.fallback_center.lng,
            zoom: self.fallback_zoom,
        }
    }
}

/// Compute the viewport for a working set
pub fn estimate(items: &[ProviderItem], settings: &ViewportSettings) -> Viewport {
    let mut points: Vec<GeoPoint> = items.iter().filter_map(|item| item.point).collect();
    if points.is_empty() {
        return settings.fallback();
    }

    points.sort_by(|a, b| a.lat.total_cmp(&b.lat).then(a.lng.total_cmp(&b.lng)));

    let n = points.len() as f64;
    let lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
    let lng = points.iter().map(|p| p.lng).sum::<f64>() / n;

    Viewport {
        lat,
        lng,
        zoom: settings.neighborhood_zoom,
    }
}
