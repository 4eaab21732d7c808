//! Raw provider records and datasets shaped like the service's responses.

#![allow(dead_code)]

use laborsuche_core::{DatasetDescriptor, RawProvider};
use serde_json::{json, Value};

/// A blood lab in Berlin with valid coordinates
pub fn blood_lab(name: &str, lat: f64, lng: f64) -> RawProvider {
    provider("blood", "Berlin", name, json!(lat), json!(lng))
}

/// A DEXA provider in Berlin with valid coordinates
pub fn dexa_scan(name: &str, lat: f64, lng: f64) -> RawProvider {
    provider("dexa", "Berlin", name, json!(lat), json!(lng))
}

pub fn provider(category: &str, city: &str, name: &str, lat: Value, lng: Value) -> RawProvider {
    let slug = name.to_lowercase().replace(' ', "-");
    RawProvider {
        category: Some(category.to_string()),
        city: Some(city.to_string()),
        name: Some(name.to_string()),
        domain: Some(format!("{slug}.de")),
        address: Some(format!("{name}strasse 1, {city}")),
        phone: Some("+49 30 1234567".to_string()),
        website: Some(format!("https://{slug}.de")),
        google_category: Some("Medical laboratory".to_string()),
        lat: Some(lat),
        lng: Some(lng),
        extra: Default::default(),
    }
}

/// A provider the scraper could not geocode
pub fn unlocated(name: &str) -> RawProvider {
    let mut record = blood_lab(name, 0.0, 0.0);
    record.lat = Some(json!("n/a"));
    record.lng = None;
    record
}

pub fn dataset(city: &str, category: &str) -> DatasetDescriptor {
    DatasetDescriptor {
        city: city.to_string(),
        category: Some(category.to_string()),
        extra: Default::default(),
    }
}
