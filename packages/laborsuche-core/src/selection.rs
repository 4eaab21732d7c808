//! Selection events from the map and list surfaces.
//!
//! Both surfaces identify a provider by its [`ProviderId`] string. A marker
//! click and a click on the matching list row carry equal ids and therefore
//! select the same item; which surface the event came from never matters
//! for resolution.

use crate::identity::ProviderId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrigin {
    Map,
    List,
}

/// A user picked a provider in one of the views
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    pub id: ProviderId,
    pub origin: SelectionOrigin,
}

impl SelectionEvent {
    pub fn from_map(id: impl Into<ProviderId>) -> Self {
        Self {
            id: id.into(),
            origin: SelectionOrigin::Map,
        }
    }

    pub fn from_list(id: impl Into<ProviderId>) -> Self {
        Self {
            id: id.into(),
            origin: SelectionOrigin::List,
        }
    }
}

/// Whether `candidate` is the highlighted item
pub fn is_active(selected: Option<&ProviderId>, candidate: &ProviderId) -> bool {
    selected.is_some_and(|id| id.as_str() == candidate.as_str())
}
