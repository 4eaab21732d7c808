//! Content-derived provider identity.
//!
//! The service has no primary key for providers, and row order changes
//! between requests. A provider's id is therefore computed from its content:
//!
//! ```text
//! {category}|{city}|{domain}|{address}|{name}
//! ```
//!
//! Missing fields contribute an empty string. The same five values always
//! give the same id, whatever else the record carries and wherever it sits
//! in the response.
//!
//! # Known limitation
//!
//! Fields are joined without escaping. A field that itself contains `|` can
//! make two different providers collide, e.g. address `"a|b"` with name
//! `"c"` versus address `"a"` with name `"b|c"`. Providers sharing all five
//! fields collide as well. Both cases are accepted: the id is a UI
//! correlation key, not a database key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::RawProvider;

/// Separator between the identity fields
pub const ID_DELIMITER: char = '|';

/// Stable identifier shared by the map and list views.
///
/// Compared by string value, never by the record it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProviderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProviderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProviderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Derive the stable id of a raw record
pub fn stable_id(record: &RawProvider) -> ProviderId {
    let fields = [
        record.category.as_deref(),
        record.city.as_deref(),
        record.domain.as_deref(),
        record.address.as_deref(),
        record.name.as_deref(),
    ];

    let capacity = fields.iter().map(|f| f.map_or(0, str::len) + 1).sum();
    let mut id = String::with_capacity(capacity);
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            id.push(ID_DELIMITER);
        }
        id.push_str(field.unwrap_or(""));
    }

    ProviderId(id)
}
