//! # Dataset Transport
//!
//! The only suspension point of the core: fetching a JSON document from an open
//! data endpoint. Resolvers depend on the [`DatasetTransport`] trait, the
//! reqwest-backed [`HttpTransport`] is the production adapter.
//!
//! Dropping an in-flight future abandons the request; no remote state is held.

use std::time::Duration;

use async_trait::async_trait;
use encadre_common::error::LookupError;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

#[async_trait]
pub trait DatasetTransport: Send + Sync {
    /// Fetches the raw body at `url`. Non-2xx statuses are errors.
    async fn get(&self, url: &Url) -> Result<Vec<u8>, LookupError>;
}

/// Fetches `url` and decodes the body as `T`.
pub async fn get_json<T>(transport: &dyn DatasetTransport, url: &Url) -> Result<T, LookupError>
where
    T: DeserializeOwned,
{
    let body = transport.get(url).await?;
    serde_json::from_slice(&body).map_err(|e| LookupError::decode(url.as_str(), e))
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("encadre/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DatasetTransport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, LookupError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| LookupError::transport(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LookupError::transport(url.as_str(), e))?;
        Ok(body.to_vec())
    }
}
