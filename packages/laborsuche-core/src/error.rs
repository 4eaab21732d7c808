//! Fetch failures and the sink they are reported to.
//!
//! A failed fetch never reaches the renderers as an error value. It is
//! handed to an [`ErrorSink`] and the controller keeps showing the last
//! good state.

use thiserror::Error;
use tracing::error;

use crate::types::Filters;

/// Why a request to the data-provider service failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection failed, timed out, or the request never completed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Service answered with a non-2xx status
    #[error("Service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Body was not the expected JSON
    #[error("Decode error: {0}")]
    Decode(String),
}

/// The controller operation a failure belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    LoadDatasets,
    LoadProviders { generation: u64, filters: Filters },
}

/// Receives every failed fetch
pub trait ErrorSink: Send + Sync {
    fn report(&self, operation: &Operation, error: &FetchError);
}

impl<F> ErrorSink for F
where
    F: Fn(&Operation, &FetchError) + Send + Sync,
{
    fn report(&self, operation: &Operation, error: &FetchError) {
        self(operation, error)
    }
}

/// Default sink: logs the failure
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, operation: &Operation, err: &FetchError) {
        match operation {
            Operation::LoadDatasets => {
                error!(error = %err, "Failed to load datasets");
            }
            Operation::LoadProviders {
                generation,
                filters,
            } => {
                error!(
                    error = %err,
                    generation,
                    city = %filters.city,
                    category = ?filters.category,
                    "Failed to load providers"
                );
            }
        }
    }
}
