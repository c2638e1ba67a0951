//! The HTTP layer underneath [`YouTubeClient`](super::YouTubeClient).
//!
//! The client only ever issues `GET` requests with query parameters and reads a JSON body back,
//! so that is all a [`Transport`] has to do. Tests swap in a fake that replays canned pages.

use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tracing::instrument;

/// How long a single request may take before it is abandoned.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executes a `GET` request and returns the decoded JSON body.
///
/// Implementations must map connection problems to [`Error::TransportFailure`], non-2xx
/// responses to [`Error::UnexpectedStatus`] and undecodable bodies to
/// [`Error::MalformedResponse`].
pub trait Transport: Send + Sync {
    fn get(
        &self,
        url: &str,
        query_params: &[(&str, &str)],
    ) -> impl Future<Output = Result<serde_json::Value>> + Send;
}

/// [`Transport`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| Error::TransportFailure {
                endpoint: "<client setup>".to_string(),
                source,
            })?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    // the parameters carry the API key, so they are left out of the span
    #[instrument(skip(self, query_params), level = tracing::Level::TRACE)]
    async fn get(&self, url: &str, query_params: &[(&str, &str)]) -> Result<serde_json::Value> {
        let response = self
            .client
            .get(url)
            .query(query_params)
            .send()
            .await
            .map_err(|source| Error::TransportFailure {
                endpoint: url.to_string(),
                // the request URL carries the API key in its query
                source: source.without_url(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(Error::UnexpectedStatus {
                endpoint: url.to_string(),
                status,
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| Error::TransportFailure {
                endpoint: url.to_string(),
                // the request URL carries the API key in its query
                source: source.without_url(),
            })?;

        serde_json::from_slice(&body).map_err(|source| Error::MalformedResponse {
            endpoint: url.to_string(),
            source,
        })
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(
        &self,
        url: &str,
        query_params: &[(&str, &str)],
    ) -> impl Future<Output = Result<serde_json::Value>> + Send {
        (**self).get(url, query_params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube_api::YouTubeClient;

    #[tokio::test]
    async fn connection_failures_do_not_leak_the_api_key() {
        let transport = ReqwestTransport::new(Duration::from_secs(2)).unwrap();
        let client = YouTubeClient::new("SUPERSECRETKEY", transport)
            .with_base_url("http://127.0.0.1:1/v3");

        let err = client.resolve_channel_id("somebody").await.unwrap_err();
        assert!(matches!(err, Error::TransportFailure { .. }), "{err:?}");

        let report = format!("{:?}", eyre::Report::new(err));
        assert!(report.contains("http://127.0.0.1:1/v3/channels"), "{report}");
        assert!(!report.contains("SUPERSECRETKEY"), "{report}");
    }
}
