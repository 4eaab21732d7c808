//! The authoritative provider working set.
//!
//! [`ProviderSet`] is pure state: no IO, no async. Every transition is a
//! synchronous method call, and the async side ([`crate::controller`]) only
//! decides *when* to call them.
//!
//! # Generations
//!
//! Each filter change bumps a generation counter and hands out a
//! [`FetchTicket`] stamped with it. A response is applied only if its
//! ticket is still the latest one; anything older is dropped. The working
//! set therefore always reflects the most recently *initiated* filter
//! change, no matter in which order responses arrive.
//!
//! # Key Invariants
//!
//! 1. **Wholesale replacement**: `apply` swaps the whole set, never patches it
//! 2. **Selection cleared on intent**: `begin` clears the selection before any
//!    response can arrive
//! 3. **Selection resolves or is empty**: a selected id always names exactly
//!    one item of the current set
//! 4. **Failures keep state**: `fail` touches neither items nor selection

use std::collections::HashSet;
use std::sync::Arc;

use crate::geo::project;
use crate::identity::{stable_id, ProviderId};
use crate::types::{Filters, ProviderItem, RawProvider};
use crate::viewport::{estimate, Viewport, ViewportSettings};

/// Proof that a fetch was started for a given generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What `apply` did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The response became the working set
    Published { count: usize },
    /// A newer filter change superseded the ticket; nothing changed
    Stale { ticket: u64, current: u64 },
}

/// Tag raw records with their ids and points, dropping repeated ids.
///
/// The first occurrence of an id wins and service order is kept otherwise.
pub fn normalize(records: Vec<RawProvider>) -> Vec<ProviderItem> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut items = Vec::with_capacity(records.len());

    for record in records {
        let id = stable_id(&record);
        if !seen.insert(id.clone()) {
            continue;
        }
        let point = project(&record);
        items.push(ProviderItem { id, point, record });
    }

    items
}

#[derive(Debug, Clone)]
pub struct ProviderSet {
    settings: ViewportSettings,
    generation: u64,
    filters: Option<Filters>,
    items: Arc<Vec<ProviderItem>>,
    selected: Option<ProviderId>,
    viewport: Viewport,
    loading: bool,
    last_error: Option<String>,
}

impl ProviderSet {
    pub fn new(settings: ViewportSettings) -> Self {
        let viewport = settings.fallback();
        Self {
            settings,
            generation: 0,
            filters: None,
            items: Arc::new(Vec::new()),
            selected: None,
            viewport,
            loading: false,
            last_error: None,
        }
    }

    /// Start a filter change: clear the selection and issue a new ticket
    pub fn begin(&mut self, filters: Filters) -> FetchTicket {
        self.generation += 1;
        self.selected = None;
        self.filters = Some(filters);
        self.loading = true;
        FetchTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Publish a response as the new working set, unless it is stale
    pub fn apply(&mut self, ticket: FetchTicket, records: Vec<RawProvider>) -> ApplyOutcome {
        if !self.is_current(ticket) {
            return ApplyOutcome::Stale {
                ticket: ticket.generation,
                current: self.generation,
            };
        }

        let items = normalize(records);
        self.viewport = estimate(&items, &self.settings);
        self.items = Arc::new(items);
        self.loading = false;
        self.last_error = None;

        // A selection made while the fetch was in flight points into the old
        // set; keep it only if the new set still has that provider.
        let still_present = self
            .selected
            .as_ref()
            .is_some_and(|id| self.items.iter().any(|item| &item.id == id));
        if !still_present {
            self.selected = None;
        }

        ApplyOutcome::Published {
            count: self.items.len(),
        }
    }

    /// Record a failed fetch. Returns false for a stale ticket.
    pub fn fail(&mut self, ticket: FetchTicket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = false;
        self.last_error = Some(message.into());
        true
    }

    /// Select `id` if it resolves in the current set; otherwise clear.
    pub fn select(&mut self, id: &ProviderId) -> Option<&ProviderItem> {
        match self.items.iter().position(|item| &item.id == id) {
            Some(index) => {
                self.selected = Some(id.clone());
                self.items.get(index)
            }
            None => {
                self.selected = None;
                None
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&ProviderId> {
        self.selected.as_ref()
    }

    pub fn selected_item(&self) -> Option<&ProviderItem> {
        let id = self.selected.as_ref()?;
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn items(&self) -> &[ProviderItem] {
        &self.items
    }

    pub(crate) fn shared_items(&self) -> Arc<Vec<ProviderItem>> {
        Arc::clone(&self.items)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn filters(&self) -> Option<&Filters> {
        self.filters.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn settings(&self) -> &ViewportSettings {
        &self.settings
    }
}

impl Default for ProviderSet {
    fn default() -> Self {
        Self::new(ViewportSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CategoryFilter;
    use serde_json::json;

    fn record(name: &str, lat: f64, lng: f64) -> RawProvider {
        RawProvider {
            category: Some("blood".into()),
            city: Some("Berlin".into()),
            name: Some(name.into()),
            lat: Some(json!(lat)),
            lng: Some(json!(lng)),
            ..Default::default()
        }
    }

    #[test]
    fn duplicate_records_collapse_to_first_occurrence() {
        let mut second = record("Labor A", 52.6, 13.5);
        second.phone = Some("030 123".into());

        let items = normalize(vec![record("Labor A", 52.5, 13.4), second]);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].record.phone, None);
    }

    #[test]
    fn stale_ticket_leaves_set_untouched() {
        let mut set = ProviderSet::default();
        let old = set.begin(Filters::new("Berlin", CategoryFilter::All));
        let new = set.begin(Filters::new("Wien", CategoryFilter::All));

        assert_eq!(
            set.apply(old, vec![record("A", 52.0, 13.0)]),
            ApplyOutcome::Stale { ticket: 1, current: 2 }
        );
        assert!(set.items().is_empty());
        assert!(set.is_loading());

        assert_eq!(
            set.apply(new, vec![record("B", 48.2, 16.4)]),
            ApplyOutcome::Published { count: 1 }
        );
        assert!(!set.is_loading());
    }

    #[test]
    fn failure_keeps_items_and_selection() {
        let mut set = ProviderSet::default();
        let ticket = set.begin(Filters::new("Berlin", CategoryFilter::All));
        set.apply(ticket, vec![record("A", 52.0, 13.0)]);
        let id = set.items()[0].id.clone();
        set.select(&id);

        let ticket = set.begin(Filters::new("Berlin", CategoryFilter::Blood));
        let id_again = set.items()[0].id.clone();
        set.select(&id_again);
        assert!(set.fail(ticket, "boom"));

        assert_eq!(set.items().len(), 1);
        assert_eq!(set.selected_id(), Some(&id));
        assert_eq!(set.last_error(), Some("boom"));
        assert!(!set.is_loading());
    }

    #[test]
    fn selection_made_during_fetch_survives_if_provider_remains() {
        let mut set = ProviderSet::default();
        let ticket = set.begin(Filters::new("Berlin", CategoryFilter::All));
        set.apply(ticket, vec![record("A", 52.0, 13.0), record("B", 52.1, 13.1)]);

        let ticket = set.begin(Filters::new("Berlin", CategoryFilter::Blood));
        let a = set.items()[0].id.clone();
        let b = set.items()[1].id.clone();
        set.select(&b);
        set.apply(ticket, vec![record("B", 52.1, 13.1)]);
        assert_eq!(set.selected_id(), Some(&b));

        let ticket = set.begin(Filters::new("Berlin", CategoryFilter::All));
        set.select(&b);
        set.apply(ticket, vec![record("A", 52.0, 13.0)]);
        assert_eq!(set.selected_id(), None);
        assert_ne!(a, b);
    }
}
