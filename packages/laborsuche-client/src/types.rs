use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// Response of `GET /api/stats`: provider counts per city, then per category.
pub type Stats = BTreeMap<String, BTreeMap<String, u64>>;
