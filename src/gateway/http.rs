//! HTTP record store.

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, warn};

use crate::config::DashboardConfig;
use crate::error::StoreError;
use crate::types::{Record, RecordId, RecordPayload};

use super::wire::{decode_list, decode_one};
use super::RecordGateway;

/// Talks to a REST collection resource.
///
/// - `GET <base>` lists records
/// - `POST <base>` creates one
/// - `PUT <base>/{id}` updates one
///
/// Any non-2xx status is a failure, whatever the body says. There is no
/// retry and no caching: every call is a fresh round trip.
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Build a gateway with timeouts from `config`.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self::with_client(client, &config.base_url))
    }

    /// Use an existing client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn record_url(&self, id: RecordId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn read_record(response: Response) -> Result<Record, StoreError> {
        let body = ensure_success(response).await?.bytes().await?;
        decode_one(&body)
    }
}

/// Turn a non-2xx response into [`StoreError::Status`].
async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    warn!(status = status.as_u16(), %url, "store rejected request");
    Err(StoreError::Status {
        status: status.as_u16(),
        url,
    })
}

#[async_trait]
impl RecordGateway for HttpGateway {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn list(&self) -> Result<Vec<Record>, StoreError> {
        debug!(url = %self.base_url, "GET records");
        let response = self.client.get(&self.base_url).send().await?;
        let body = ensure_success(response).await?.bytes().await?;
        decode_list(&body)
    }

    async fn create(&self, payload: &RecordPayload) -> Result<Record, StoreError> {
        debug!(url = %self.base_url, title = %payload.title, "POST record");
        let response = self
            .client
            .post(&self.base_url)
            .json(payload)
            .send()
            .await?;
        Self::read_record(response).await
    }

    async fn update(&self, id: RecordId, payload: &RecordPayload) -> Result<Record, StoreError> {
        let url = self.record_url(id);
        debug!(%url, "PUT record");
        let response = self.client.put(&url).json(payload).send().await?;
        Self::read_record(response).await
    }
}
