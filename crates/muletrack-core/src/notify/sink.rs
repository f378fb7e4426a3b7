//! Delivery sink
//!
//! One HTTP POST per emitted notification, best effort. The engine spawns
//! deliveries fire-and-forget; an in-flight request is never cancelled and
//! its outcome never reaches the debounce gate.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::{Error, Result};

use super::payload::JSON_CONTENT_TYPE;

/// Asynchronous POST transport for rendered payloads
#[async_trait]
pub trait DeliverySink: Send + Sync + 'static {
    /// POST a JSON body to the given URL, resolving to success or failure
    async fn post(&self, url: &str, body: String) -> Result<()>;
}

/// reqwest-backed delivery sink
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: Client,
}

impl HttpSink {
    /// Create a sink with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::delivery(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl DeliverySink for HttpSink {
    async fn post(&self, url: &str, body: String) -> Result<()> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| Error::delivery(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::delivery(format!(
                "endpoint returned {status}: {body}"
            )));
        }

        debug!(url = %url, "Balance update POST success");
        Ok(())
    }
}
