//! Types shared with the data-provider service and the renderers

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::geo::GeoPoint;
use crate::identity::ProviderId;

// ============================================================================
// Categories
// ============================================================================

/// Provider category as sent by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// DEXA body-composition scanning
    Dexa,
    /// Self-pay blood laboratory
    Blood,
}

impl Category {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dexa" => Some(Category::Dexa),
            "blood" => Some(Category::Blood),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dexa => "dexa",
            Category::Blood => "blood",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Dexa => "DEXA Body Composition",
            Category::Blood => "Blutlabor (Selbstzahler)",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Category::Dexa => "DEXA",
            Category::Blood => "Blut",
        }
    }

    /// Marker and chip color
    pub fn color(&self) -> &'static str {
        match self {
            Category::Dexa => "#2563eb",
            Category::Blood => "#16a34a",
        }
    }
}

/// Category filter for the provider query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Dexa,
    Blood,
}

impl CategoryFilter {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "Alle",
            CategoryFilter::Dexa => "DEXA",
            CategoryFilter::Blood => "Blutlabor",
        }
    }

    /// Value for the `category` query parameter; `None` means unfiltered
    pub fn as_query(&self) -> Option<&'static str> {
        self.category().map(|c| c.as_str())
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Dexa => Some(Category::Dexa),
            CategoryFilter::Blood => Some(Category::Blood),
        }
    }

    pub fn variants() -> &'static [CategoryFilter] {
        &[CategoryFilter::All, CategoryFilter::Dexa, CategoryFilter::Blood]
    }
}

// ============================================================================
// Filters
// ============================================================================

/// Active filter intent. Every change replaces the working set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filters {
    pub city: String,
    pub category: CategoryFilter,
    /// Validation status (`YES`, `NO`, `QUESTIONABLE`); `None` means any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Filters {
    pub fn new(city: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            city: city.into(),
            category,
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }
}

// ============================================================================
// Service Records
// ============================================================================

/// One ingestible source region as listed by `/api/datasets`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    pub city: String,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Provider record exactly as the service returns it.
///
/// `lat`/`lng` stay untyped: the service passes through whatever the
/// scraper stored, which may be a number, a numeric string, garbage or
/// nothing at all. See [`crate::geo::project`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProvider {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub google_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<Value>,
    /// Anything else the service sends (status, rating, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accept strings as-is and numbers/bools in their string form. Anything
/// else becomes `None` so one malformed row cannot fail the whole response.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

impl RawProvider {
    pub fn category(&self) -> Option<Category> {
        self.category.as_deref().and_then(Category::parse)
    }
}

// ============================================================================
// Working Set
// ============================================================================

/// A provider record tagged with its stable id and, when usable, its map point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderItem {
    pub id: ProviderId,
    pub point: Option<GeoPoint>,
    pub record: RawProvider,
}

impl ProviderItem {
    pub fn display_name(&self) -> &str {
        self.record.name.as_deref().unwrap_or("Unbekannt")
    }

    /// Category used for styling. Unknown categories are styled as blood labs.
    pub fn category(&self) -> Category {
        self.record.category().unwrap_or(Category::Blood)
    }

    /// Second list-row line: address, else domain, else city
    pub fn subtitle(&self) -> &str {
        self.record
            .address
            .as_deref()
            .or(self.record.domain.as_deref())
            .or(self.record.city.as_deref())
            .unwrap_or("")
    }

    pub fn is_mappable(&self) -> bool {
        self.point.is_some()
    }
}
