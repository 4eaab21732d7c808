//! Provider Set Controller: fetch-on-filter-change around [`ProviderSet`].
//!
//! The controller owns the working set and the selection. Renderers never
//! mutate either; they read [`Snapshot`]s (via [`ProviderSetController::subscribe`])
//! and send intent back through `set_filters` and `select_by_id`.
//!
//! # Ordering
//!
//! `set_filters` does its synchronous part (clear selection, bump the
//! generation) *before* it returns the fetch future. Whatever order the
//! fetch futures complete in, only the response for the latest generation
//! is applied. Older responses are logged and dropped.
//!
//! # Failures
//!
//! Fetch failures go to the [`ErrorSink`] and leave the working set,
//! selection and viewport as they were.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::datasets::{city_options, initial_city};
use crate::error::{ErrorSink, FetchError, Operation};
use crate::identity::ProviderId;
use crate::selection::{is_active, SelectionEvent};
use crate::types::{DatasetDescriptor, Filters, ProviderItem, RawProvider};
use crate::viewport::{Viewport, ViewportSettings};
use crate::working_set::{ApplyOutcome, FetchTicket, ProviderSet};

/// The data-provider service as seen by the controller
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ProviderSource: Send + Sync {
    /// `GET /api/datasets`
    async fn datasets(&self) -> Result<Vec<DatasetDescriptor>, FetchError>;

    /// `GET /api/providers` scoped to `filters`
    async fn providers(&self, filters: &Filters) -> Result<Vec<RawProvider>, FetchError>;
}

/// Read-only view of the controller state handed to renderers
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub generation: u64,
    pub filters: Option<Filters>,
    pub items: Arc<Vec<ProviderItem>>,
    pub selected: Option<ProviderId>,
    pub viewport: Viewport,
    pub cities: Arc<Vec<String>>,
    pub loading: bool,
    pub last_error: Option<String>,
}

impl Snapshot {
    /// The selected item, or `None` if nothing (or nothing current) is selected
    pub fn selected_item(&self) -> Option<&ProviderItem> {
        let id = self.selected.as_ref()?;
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn is_selected(&self, id: &ProviderId) -> bool {
        is_active(self.selected.as_ref(), id)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Items that can be drawn on the map
    pub fn markers(&self) -> impl Iterator<Item = &ProviderItem> {
        self.items.iter().filter(|item| item.is_mappable())
    }
}

struct State {
    set: ProviderSet,
    cities: Arc<Vec<String>>,
}

impl State {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            generation: self.set.generation(),
            filters: self.set.filters().cloned(),
            items: self.set.shared_items(),
            selected: self.set.selected_id().cloned(),
            viewport: self.set.viewport(),
            cities: Arc::clone(&self.cities),
            loading: self.set.is_loading(),
            last_error: self.set.last_error().map(str::to_string),
        }
    }
}

/// Owns the provider working set and selection.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct ProviderSetController {
    source: Arc<dyn ProviderSource>,
    sink: Arc<dyn ErrorSink>,
    state: Arc<Mutex<State>>,
    updates: Arc<watch::Sender<Snapshot>>,
}

impl ProviderSetController {
    pub fn new(
        source: Arc<dyn ProviderSource>,
        sink: Arc<dyn ErrorSink>,
        settings: ViewportSettings,
    ) -> Self {
        let state = State {
            set: ProviderSet::new(settings),
            cities: Arc::new(Vec::new()),
        };
        let (updates, _) = watch::channel(state.snapshot());

        Self {
            source,
            sink,
            state: Arc::new(Mutex::new(state)),
            updates: Arc::new(updates),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // State is only mutated through ProviderSet's methods, which do not
        // panic half-way; a poisoned lock still holds a consistent value.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &State) {
        self.updates.send_replace(state.snapshot());
    }

    /// Current state
    pub fn snapshot(&self) -> Snapshot {
        self.updates.borrow().clone()
    }

    /// Receive a new snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.updates.subscribe()
    }

    /// Change filters.
    ///
    /// The selection is cleared before this returns. The returned future
    /// fetches and publishes the new working set; if another `set_filters`
    /// call happens first, its result is discarded when it arrives.
    pub fn set_filters(&self, filters: Filters) -> impl Future<Output = ()> + 'static {
        let ticket = {
            let mut state = self.lock();
            let ticket = state.set.begin(filters.clone());
            self.publish(&state);
            ticket
        };

        debug!(
            generation = ticket.generation(),
            city = %filters.city,
            category = ?filters.category,
            "Filter change started"
        );

        let this = self.clone();
        async move { this.complete(ticket, filters).await }
    }

    async fn complete(&self, ticket: FetchTicket, filters: Filters) {
        let result = self.source.providers(&filters).await;

        let failure = {
            let mut state = self.lock();
            match result {
                Ok(records) => {
                    let received = records.len();
                    match state.set.apply(ticket, records) {
                        ApplyOutcome::Published { count } => {
                            info!(
                                generation = ticket.generation(),
                                city = %filters.city,
                                category = ?filters.category,
                                received,
                                count,
                                "Published provider working set"
                            );
                            self.publish(&state);
                        }
                        ApplyOutcome::Stale { ticket, current } => {
                            warn!(ticket, current, received, "Discarded stale provider response");
                        }
                    }
                    None
                }
                Err(err) => {
                    if state.set.fail(ticket, err.to_string()) {
                        self.publish(&state);
                    }
                    Some(err)
                }
            }
        };

        if let Some(err) = failure {
            let operation = Operation::LoadProviders {
                generation: ticket.generation(),
                filters,
            };
            self.sink.report(&operation, &err);
        }
    }

    /// Select a provider by id. Ids that do not resolve in the current
    /// working set clear the selection.
    pub fn select_by_id(&self, id: impl Into<ProviderId>) -> Option<ProviderItem> {
        let id = id.into();
        let mut state = self.lock();
        let resolved = state.set.select(&id).cloned();
        if resolved.is_none() {
            debug!(id = %id, "Selection does not resolve in current working set");
        }
        self.publish(&state);
        resolved
    }

    /// Route a map or list click to [`Self::select_by_id`]
    pub fn handle_selection(&self, event: SelectionEvent) -> Option<ProviderItem> {
        debug!(origin = ?event.origin, id = %event.id, "Selection event");
        self.select_by_id(event.id)
    }

    pub fn clear_selection(&self) {
        let mut state = self.lock();
        state.set.clear_selection();
        self.publish(&state);
    }

    /// Fetch the dataset list and publish the city options.
    ///
    /// On failure the previous options (empty at startup) are kept and
    /// returned.
    pub async fn load_datasets(&self) -> Arc<Vec<String>> {
        match self.source.datasets().await {
            Ok(datasets) => {
                let cities = Arc::new(city_options(&datasets));
                info!(
                    datasets = datasets.len(),
                    cities = cities.len(),
                    "Loaded datasets"
                );
                let mut state = self.lock();
                state.cities = Arc::clone(&cities);
                self.publish(&state);
                cities
            }
            Err(err) => {
                self.sink.report(&Operation::LoadDatasets, &err);
                Arc::clone(&self.lock().cities)
            }
        }
    }

    /// Startup sequence: fetch `initial` right away while the dataset list
    /// loads. If the list does not offer `initial.city`, switch to the
    /// first offered city, unless the filters changed in the meantime.
    pub async fn bootstrap(&self, initial: Filters) {
        let first = self.set_filters(initial.clone());
        let generation = self.lock().set.generation();

        let redirect = async {
            let cities = self.load_datasets().await;
            let Some(city) = initial_city(&cities, &initial.city) else {
                return;
            };
            if city == initial.city || self.lock().set.generation() != generation {
                return;
            }
            debug!(from = %initial.city, to = %city, "Preferred city not offered");
            self.set_filters(initial.clone().with_city(city)).await;
        };

        futures::join!(first, redirect);
    }
}
