//! Server functions proxying the data-provider service.
//!
//! The browser never talks to the service directly; it calls these, and the
//! server forwards through [`LaborsucheClient`].

use async_trait::async_trait;
use dioxus::prelude::*;
use laborsuche_core::{DatasetDescriptor, FetchError, Filters, ProviderSource, RawProvider};

#[cfg(feature = "server")]
use laborsuche_client::LaborsucheClient;

#[cfg(feature = "server")]
mod backend {
    use std::sync::OnceLock;

    use anyhow::{Context, Result};
    use laborsuche_client::LaborsucheClient;

    use crate::config::Config;

    static CONFIG: OnceLock<Config> = OnceLock::new();
    static CLIENT: OnceLock<LaborsucheClient> = OnceLock::new();

    pub fn config() -> Result<&'static Config> {
        if let Some(config) = CONFIG.get() {
            return Ok(config);
        }
        let config = Config::from_env().context("Failed to load configuration")?;
        tracing::info!(api_base = %config.api_base, default_city = %config.default_city, "Loaded configuration");
        Ok(CONFIG.get_or_init(|| config))
    }

    pub fn client() -> Result<&'static LaborsucheClient> {
        if let Some(client) = CLIENT.get() {
            return Ok(client);
        }
        let config = config()?;
        let client = LaborsucheClient::with_timeout(&config.api_base, config.request_timeout)
            .context("Failed to create data-provider client")?;
        Ok(CLIENT.get_or_init(|| client))
    }
}

#[cfg(feature = "server")]
fn client() -> Result<&'static LaborsucheClient, ServerFnError> {
    backend::client().map_err(|e| ServerFnError::new(format!("{e:#}")))
}

/// Initial filters: the configured default city, all categories
#[server]
pub async fn default_filters() -> Result<Filters, ServerFnError> {
    let config = backend::config().map_err(|e| ServerFnError::new(format!("{e:#}")))?;
    Ok(Filters::new(config.default_city.clone(), Default::default()))
}

#[server]
pub async fn fetch_datasets() -> Result<Vec<DatasetDescriptor>, ServerFnError> {
    client()?.datasets().await.map_err(|e| {
        tracing::warn!(error = %e, "Dataset request failed");
        ServerFnError::new(e.to_string())
    })
}

#[server]
pub async fn fetch_providers(filters: Filters) -> Result<Vec<RawProvider>, ServerFnError> {
    client()?.providers(&filters).await.map_err(|e| {
        tracing::warn!(city = %filters.city, error = %e, "Provider request failed");
        ServerFnError::new(e.to_string())
    })
}

/// Provider source backed by the server functions above
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerFnSource;

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ProviderSource for ServerFnSource {
    async fn datasets(&self) -> Result<Vec<DatasetDescriptor>, FetchError> {
        fetch_datasets().await.map_err(transport_error)
    }

    async fn providers(&self, filters: &Filters) -> Result<Vec<RawProvider>, FetchError> {
        fetch_providers(filters.clone())
            .await
            .map_err(transport_error)
    }
}

/// The underlying client error is logged on the server; only its message
/// crosses the wire.
fn transport_error(err: ServerFnError) -> FetchError {
    match err {
        ServerFnError::ServerError(message) => FetchError::Transport(message),
        other => FetchError::Transport(other.to_string()),
    }
}
