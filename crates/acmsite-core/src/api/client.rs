//! HTTP client for the remote content document.

use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::{BoxFuture, FutureExt};
use reqwest::{header, Client};
use tracing::debug;

use super::{ContentSource, FetchError};
use crate::models::ContentBundle;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fetches the content document with a plain GET.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct RemoteSource {
    client: Client,
    url: String,
    timeout: Duration,
}

impl RemoteSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    async fn fetch_document(&self) -> Result<ContentBundle, FetchError> {
        debug!(url = %self.url, "Requesting content document");

        let response = self
            .client
            .get(&self.url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let response = Self::check_response(response).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        debug!(bytes = body.len(), "Content document received");
        ContentBundle::from_json(&body)
    }

    fn map_transport_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::from(e)
        }
    }

    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(FetchError::from_status(status, &body))
    }
}

impl ContentSource for RemoteSource {
    fn fetch(&self) -> BoxFuture<'_, Result<ContentBundle, FetchError>> {
        self.fetch_document().boxed()
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
