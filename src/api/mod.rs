//! Access to the rates service.
//!
//! This module is organized by concern:
//! - [`client`] - HTTP calls against `/api/rates` and `/api/rates/filtered`
//! - [`provider`] - the [`RateProvider`] abstraction over remote and local data
//!
//! Every failure is classified into a [`FetchError`] carrying the message
//! shown to the user.

pub mod client;
pub mod provider;

use reqwest::StatusCode;

use crate::models::{RatesPage, RatesResponse};

pub use client::RatesClient;
pub use provider::{LocalProvider, RateProvider, RemoteProvider};

/// Shown when the server reports failure without a message.
pub const FALLBACK_ERROR: &str = "Failed to fetch rates";

/// Why a rates fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The server could not be reached.
    #[error("network failure: {0}")]
    Network(String),

    /// The endpoint returned 404.
    #[error("endpoint not found")]
    NotFound,

    /// The endpoint returned a 5xx status.
    #[error("server error (HTTP {0})")]
    Server(u16),

    /// The envelope reported `success: false`.
    #[error("{0}")]
    Application(String),

    /// Anything else: other statuses, undecodable bodies.
    #[error("unexpected failure: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Message displayed in the inline error notice.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Network(_) => {
                "Unable to connect to the rates service. Please check your internet connection."
                    .to_string()
            }
            FetchError::NotFound => {
                "The rates service is currently unavailable. Please try again later.".to_string()
            }
            FetchError::Server(_) => {
                "The server encountered an error. Please try again later.".to_string()
            }
            FetchError::Application(message) => message.clone(),
            FetchError::Unknown(_) => "Failed to load rates. Please try again.".to_string(),
        }
    }

    /// Classifies a non-success HTTP status.
    pub fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::NOT_FOUND {
            FetchError::NotFound
        } else if status.is_server_error() {
            FetchError::Server(status.as_u16())
        } else {
            FetchError::Unknown(format!("unexpected HTTP status {status}"))
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::from_status(status)
        } else if err.is_connect() || err.is_timeout() || err.is_request() {
            FetchError::Network(err.to_string())
        } else {
            FetchError::Unknown(err.to_string())
        }
    }
}

/// Unwraps a decoded envelope, turning `success: false` into
/// [`FetchError::Application`].
pub fn into_page(response: RatesResponse) -> Result<RatesPage, FetchError> {
    if !response.success {
        let message = response
            .error
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| FALLBACK_ERROR.to_string());
        return Err(FetchError::Application(message));
    }
    Ok(RatesPage {
        rates: response.data,
        total: response.total,
        last_updated: response.last_updated,
    })
}
