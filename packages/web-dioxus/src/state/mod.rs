//! Global state management

use std::sync::Arc;

use dioxus::prelude::*;
use laborsuche_core::{
    CategoryFilter, Filters, ProviderSetController, SelectionEvent, Snapshot, TracingErrorSink,
    ViewportSettings,
};

use crate::server_fns::{default_filters, ServerFnSource};

/// Used when the server cannot tell us its configured default
pub const FALLBACK_CITY: &str = "Berlin";

/// Map page state shared by the filter bar, map and sidebar.
///
/// `snapshot` mirrors the controller; components only read it and go through
/// the intent methods to change anything.
#[derive(Clone)]
pub struct MapState {
    pub controller: ProviderSetController,
    pub snapshot: Signal<Snapshot>,
    pub settings: ViewportSettings,
}

impl MapState {
    pub fn new(settings: ViewportSettings) -> Self {
        let controller = ProviderSetController::new(
            Arc::new(ServerFnSource),
            Arc::new(TracingErrorSink),
            settings.clone(),
        );
        Self {
            snapshot: Signal::new(controller.snapshot()),
            controller,
            settings,
        }
    }

    /// Filters the current working set was requested with
    pub fn filters(&self) -> Filters {
        self.snapshot
            .peek()
            .filters
            .clone()
            .unwrap_or_else(|| Filters::new(FALLBACK_CITY, CategoryFilter::All))
    }

    pub fn set_city(&self, city: String) {
        self.apply_filters(self.filters().with_city(city));
    }

    pub fn set_category(&self, category: CategoryFilter) {
        self.apply_filters(self.filters().with_category(category));
    }

    fn apply_filters(&self, filters: Filters) {
        let fetch = self.controller.set_filters(filters);
        self.sync();
        spawn(fetch);
    }

    /// Marker or list row click
    pub fn select(&self, event: SelectionEvent) {
        self.controller.handle_selection(event);
        self.sync();
    }

    pub fn clear_selection(&self) {
        self.controller.clear_selection();
        self.sync();
    }

    fn sync(&self) {
        let mut snapshot = self.snapshot;
        snapshot.set(self.controller.snapshot());
    }
}

/// Owns the controller for everything below it. Dropping the provider
/// cancels the startup fetch and the update loop.
#[component]
pub fn MapStateProvider(children: Element) -> Element {
    let state = use_context_provider(|| MapState::new(ViewportSettings::default()));

    // Mirror controller updates into the signal
    let mirror = state.clone();
    use_future(move || {
        let state = mirror.clone();
        async move {
            let mut updates = state.controller.subscribe();
            while updates.changed().await.is_ok() {
                let snapshot = updates.borrow_and_update().clone();
                let mut signal = state.snapshot;
                signal.set(snapshot);
            }
        }
    });

    // Startup: default city, then whatever the dataset list offers
    use_effect(move || {
        let controller = state.controller.clone();
        spawn(async move {
            let initial = match default_filters().await {
                Ok(filters) => filters,
                Err(e) => {
                    tracing::warn!(error = %e, "Falling back to built-in default city");
                    Filters::new(FALLBACK_CITY, CategoryFilter::All)
                }
            };
            controller.bootstrap(initial).await;
        });
    });

    children
}

/// Hook to access the map state
pub fn use_map_state() -> MapState {
    use_context::<MapState>()
}
