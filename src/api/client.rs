//! HTTP client for the rates endpoints.

use std::time::Duration;

use tracing::{debug, info};

use super::{FetchError, into_page};
use crate::Result;
use crate::filter::FilterCriteria;
use crate::models::{RatesPage, RatesResponse};

const RATES_PATH: &str = "/api/rates";
const FILTERED_PATH: &str = "/api/rates/filtered";

/// Thin wrapper over a [`reqwest::Client`] bound to one base URL.
#[derive(Debug, Clone)]
pub struct RatesClient {
    http: reqwest::Client,
    base_url: String,
}

impl RatesClient {
    /// Builds a client for `base_url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RatescopeError::Http`](crate::RatescopeError::Http) if the
    /// underlying client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ratescope/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/rates`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] classifying transport, status, decoding and
    /// application failures.
    pub async fn fetch_all(&self) -> std::result::Result<RatesPage, FetchError> {
        let url = format!("{}{RATES_PATH}", self.base_url);
        self.get(&url, &[]).await
    }

    /// `GET /api/rates/filtered` with only the active predicates as query
    /// parameters.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_all`](Self::fetch_all).
    pub async fn fetch_filtered(
        &self,
        criteria: &FilterCriteria,
    ) -> std::result::Result<RatesPage, FetchError> {
        let url = format!("{}{FILTERED_PATH}", self.base_url);
        self.get(&url, &criteria.query_params()).await
    }

    async fn get(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> std::result::Result<RatesPage, FetchError> {
        debug!(url, ?params, "Fetching rates");

        let response = self.http.get(url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_status(status));
        }

        let body: RatesResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Unknown(format!("invalid response body: {e}")))?;
        let page = into_page(body)?;

        info!(count = page.rates.len(), "Fetched rates");
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response on loopback and returns the base URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> RatesClient {
        RatesClient::new(base_url, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn base_url_is_normalized() {
        let client = RatesClient::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn success_envelope_is_a_page() {
        let base = serve_once(
            "200 OK",
            r#"{"success":true,"data":[],"total":0,"lastUpdated":"2026-10-15T09:00:00Z"}"#,
        )
        .await;
        let page = client(&base).fetch_all().await.unwrap();
        assert!(page.rates.is_empty());
        assert_eq!(page.last_updated.as_deref(), Some("2026-10-15T09:00:00Z"));
    }

    #[tokio::test]
    async fn not_found_status() {
        let base = serve_once("404 Not Found", "").await;
        let err = client(&base).fetch_all().await.unwrap_err();
        assert_eq!(err, FetchError::NotFound);
    }

    #[tokio::test]
    async fn server_error_status() {
        let base = serve_once("503 Service Unavailable", "").await;
        let err = client(&base).fetch_all().await.unwrap_err();
        assert_eq!(err, FetchError::Server(503));
    }

    #[tokio::test]
    async fn failure_envelope_is_an_application_error() {
        let base = serve_once("200 OK", r#"{"success":false,"error":"Maintenance"}"#).await;
        let err = client(&base).fetch_all().await.unwrap_err();
        assert_eq!(err, FetchError::Application("Maintenance".to_string()));
    }

    #[tokio::test]
    async fn undecodable_body_is_unknown() {
        let base = serve_once("200 OK", "<html>oops</html>").await;
        let err = client(&base).fetch_all().await.unwrap_err();
        assert!(matches!(err, FetchError::Unknown(_)), "{err:?}");
        assert_eq!(err.user_message(), "Failed to load rates. Please try again.");
    }

    #[tokio::test]
    async fn filtered_endpoint_is_used() {
        let base = serve_once("200 OK", r#"{"success":true,"data":[]}"#).await;
        let criteria = FilterCriteria {
            province: Some("Ontario".to_string()),
            ..FilterCriteria::default()
        };
        assert!(client(&base).fetch_filtered(&criteria).await.is_ok());
    }

    #[tokio::test]
    async fn refused_connection_is_a_network_failure() {
        // Bind then drop to get a loopback port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}")).fetch_all().await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)), "{err:?}");
        assert!(err.user_message().contains("Unable to connect"));
    }
}
