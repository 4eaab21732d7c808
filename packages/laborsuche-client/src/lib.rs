//! Pure REST client for the Laborsuche data-provider service.
//!
//! Covers the read-only endpoints the map needs (`/api/datasets`,
//! `/api/providers`) plus the auxiliary ones the service exposes for
//! debugging (`/health`, `/api/stats`, `/api/providers/{city}/{category}`).
//! Native targets only; the browser build reaches the service through
//! server functions.
//!
//! # Example
//!
//! ```rust,ignore
//! use laborsuche_client::LaborsucheClient;
//! use laborsuche_core::{CategoryFilter, Filters};
//!
//! let client = LaborsucheClient::new("http://localhost:8000")?;
//!
//! let providers = client.providers(&Filters::new("Berlin", CategoryFilter::Dexa)).await?;
//! for p in &providers {
//!     println!("{}", p.name.as_deref().unwrap_or("(unnamed)"));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{ClientError, Result};
pub use types::{Health, Stats};

use std::time::Duration;

use async_trait::async_trait;
use laborsuche_core::{Category, DatasetDescriptor, FetchError, Filters, ProviderSource, RawProvider};
use reqwest::Url;
use serde::de::DeserializeOwned;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct LaborsucheClient {
    client: reqwest::Client,
    base_url: Url,
}

impl LaborsucheClient {
    /// Client for the service at `base_url` with the default request timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /api/datasets`: one descriptor per city and category.
    pub async fn datasets(&self) -> Result<Vec<DatasetDescriptor>> {
        let url = self.endpoint("api/datasets")?;
        let datasets: Vec<DatasetDescriptor> = self.get_json(url).await?;
        tracing::debug!(count = datasets.len(), "Fetched datasets");
        Ok(datasets)
    }

    /// `GET /api/providers` scoped to the given filters.
    pub async fn providers(&self, filters: &Filters) -> Result<Vec<RawProvider>> {
        let url = self.providers_url(filters)?;
        let providers: Vec<RawProvider> = self.get_json(url).await?;
        tracing::debug!(
            city = %filters.city,
            category = ?filters.category,
            count = providers.len(),
            "Fetched providers"
        );
        Ok(providers)
    }

    /// `GET /api/providers/{city}/{category}`: one dataset file, unfiltered.
    pub async fn providers_by_path(&self, city: &str, category: Category) -> Result<Vec<RawProvider>> {
        let mut url = self.endpoint("api/providers")?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .push(city)
            .push(category.as_str());
        self.get_json(url).await
    }

    /// `GET /api/stats`
    pub async fn stats(&self) -> Result<Stats> {
        let url = self.endpoint("api/stats")?;
        self.get_json(url).await
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<Health> {
        let url = self.endpoint("health")?;
        self.get_json(url).await
    }

    /// Query URL for `/api/providers`.
    ///
    /// `city` is left out when empty, `category` when the filter is `All`,
    /// `status` when unset.
    pub fn providers_url(&self, filters: &Filters) -> Result<Url> {
        let mut url = self.endpoint("api/providers")?;
        {
            let mut query = url.query_pairs_mut();
            if !filters.city.is_empty() {
                query.append_pair("city", &filters.city);
            }
            if let Some(category) = filters.category.as_query() {
                query.append_pair("category", category);
            }
            if let Some(status) = filters.status.as_deref().filter(|s| !s.is_empty()) {
                query.append_pair("status", status);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::trace!(%url, "GET");
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }
}

/// Parse the base URL, making sure relative joins keep any path prefix.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl(raw.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl ProviderSource for LaborsucheClient {
    async fn datasets(&self) -> std::result::Result<Vec<DatasetDescriptor>, FetchError> {
        LaborsucheClient::datasets(self).await.map_err(FetchError::from)
    }

    async fn providers(&self, filters: &Filters) -> std::result::Result<Vec<RawProvider>, FetchError> {
        LaborsucheClient::providers(self, filters)
            .await
            .map_err(FetchError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laborsuche_core::CategoryFilter;

    fn client(base: &str) -> LaborsucheClient {
        LaborsucheClient::new(base).unwrap()
    }

    #[test]
    fn all_category_is_omitted_from_query() {
        let url = client("http://localhost:8000")
            .providers_url(&Filters::new("Berlin", CategoryFilter::All))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/providers?city=Berlin");
    }

    #[test]
    fn category_and_status_are_appended() {
        let filters = Filters::new("Zürich", CategoryFilter::Blood).with_status("YES");
        let url = client("http://localhost:8000").providers_url(&filters).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/providers?city=Z%C3%BCrich&category=blood&status=YES"
        );
    }

    #[test]
    fn empty_filters_produce_no_query() {
        let url = client("http://localhost:8000")
            .providers_url(&Filters::new("", CategoryFilter::All))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/providers");
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let url = client("https://example.org/laborsuche")
            .providers_url(&Filters::new("Wien", CategoryFilter::Dexa))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/laborsuche/api/providers?city=Wien&category=dexa"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            LaborsucheClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            LaborsucheClient::new("mailto:lab@example.org"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn errors_map_to_fetch_errors() {
        let err = ClientError::Api {
            status: 404,
            message: "not found".into(),
        };
        assert_eq!(
            FetchError::from(err),
            FetchError::Status {
                status: 404,
                message: "not found".into()
            }
        );
    }
}
