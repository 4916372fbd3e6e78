//! Rate data providers.
//!
//! A [`RateProvider`] is the single data contract the UI consumes. The
//! [`RemoteProvider`] fetches from the rates service; the [`LocalProvider`]
//! serves data that was handed to the application up front (a JSON file)
//! and is available immediately. Either way the UI filters locally.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use super::{FetchError, RatesClient, into_page};
use crate::filter::FilterCriteria;
use crate::models::{Rate, RatesPage, RatesResponse};

/// Source of rate data.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Data that is available without fetching.
    ///
    /// When this returns `Some`, the view starts in its loaded state and
    /// never fetches.
    fn preloaded(&self) -> Option<RatesPage>;

    /// Fetches rates. `criteria` is a hint a provider may use to reduce the
    /// payload; callers still filter the result themselves.
    async fn fetch(&self, criteria: &FilterCriteria) -> Result<RatesPage, FetchError>;

    /// Short description for the status bar.
    fn describe(&self) -> String;
}

/// Fetches from the rates service.
pub struct RemoteProvider {
    client: RatesClient,
    server_filtering: bool,
}

impl RemoteProvider {
    #[must_use]
    pub fn new(client: RatesClient, server_filtering: bool) -> Self {
        Self {
            client,
            server_filtering,
        }
    }
}

#[async_trait]
impl RateProvider for RemoteProvider {
    fn preloaded(&self) -> Option<RatesPage> {
        None
    }

    async fn fetch(&self, criteria: &FilterCriteria) -> Result<RatesPage, FetchError> {
        if self.server_filtering && !criteria.is_empty() {
            self.client.fetch_filtered(criteria).await
        } else {
            self.client.fetch_all().await
        }
    }

    fn describe(&self) -> String {
        self.client.base_url().to_string()
    }
}

/// Serves a fixed, externally supplied list of rates.
#[derive(Debug, Clone)]
pub struct LocalProvider {
    page: RatesPage,
    origin: String,
}

/// A rates file holds either the service envelope or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum RatesFile {
    Envelope(RatesResponse),
    Bare(Vec<Rate>),
}

impl LocalProvider {
    /// Wraps an in-memory list.
    #[must_use]
    pub fn new(rates: Vec<Rate>) -> Self {
        Self {
            page: RatesPage::from_rates(rates),
            origin: "local".to_string(),
        }
    }

    /// Loads rates from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// is an envelope reporting `success: false`.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::RatescopeError::Io(format!("failed to read {}: {e}", path.display()))
        })?;
        let page = match serde_json::from_str::<RatesFile>(&contents)? {
            RatesFile::Envelope(envelope) => into_page(envelope).map_err(|e| {
                crate::RatescopeError::Config(format!("{} reports failure: {e}", path.display()))
            })?,
            RatesFile::Bare(rates) => RatesPage::from_rates(rates),
        };

        for rate in &page.rates {
            let issues = rate.validate();
            if !issues.is_empty() {
                warn!(id = %rate.id, ?issues, "Rate violates data invariants");
            }
        }
        info!(count = page.rates.len(), path = %path.display(), "Loaded local rates");

        Ok(Self {
            page,
            origin: path.display().to_string(),
        })
    }
}

#[async_trait]
impl RateProvider for LocalProvider {
    fn preloaded(&self) -> Option<RatesPage> {
        Some(self.page.clone())
    }

    async fn fetch(&self, _criteria: &FilterCriteria) -> Result<RatesPage, FetchError> {
        Ok(self.page.clone())
    }

    fn describe(&self) -> String {
        self.origin.clone()
    }
}
