//! Client-side state pipeline for the Laborsuche provider map.
//!
//! Raw provider records fetched from the data-provider service are turned
//! into a de-duplicated, identity-tagged working set. The map viewport is
//! derived from that set, and list and map selection share one identifier.
//!
//! ```text
//! set_filters ──► ProviderSource::providers ──► stable_id + project
//!                                                   │
//!                                                   ▼
//!                      Snapshot ◄── estimate ◄── ProviderSet::apply
//!                         │
//!               map / list / filter bar ──► select_by_id
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use laborsuche_core::{CategoryFilter, Filters, ProviderSetController, TracingErrorSink};
//!
//! let controller = ProviderSetController::new(source, Arc::new(TracingErrorSink), Default::default());
//! let mut snapshots = controller.subscribe();
//!
//! controller.set_filters(Filters::new("Berlin", CategoryFilter::Dexa)).await;
//! println!("{} providers", snapshots.borrow_and_update().count());
//! ```

pub mod controller;
pub mod datasets;
pub mod error;
pub mod geo;
pub mod identity;
pub mod selection;
pub mod types;
pub mod viewport;
pub mod working_set;

pub use controller::{ProviderSetController, ProviderSource, Snapshot};
pub use datasets::{city_options, initial_city};
pub use error::{ErrorSink, FetchError, Operation, TracingErrorSink};
pub use geo::{coerce_coordinate, project, GeoPoint};
pub use identity::{stable_id, ProviderId, ID_DELIMITER};
pub use selection::{SelectionEvent, SelectionOrigin};
pub use types::{Category, CategoryFilter, DatasetDescriptor, Filters, ProviderItem, RawProvider};
pub use viewport::{estimate, Viewport, ViewportSettings};
pub use working_set::{normalize, ApplyOutcome, FetchTicket, ProviderSet};
