use super::types::*;
use crate::{Error, Result, config::ApiConfig};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Seam between the handler and the remote calculator.
#[async_trait]
pub trait CalcClient: Send + Sync {
    async fn calculate(&self, request: &CalcRequest) -> Result<CalcResponse>;
}

pub struct HttpCalcClient {
    client: reqwest::Client,
    url: String,
}

impl HttpCalcClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            url: config.url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CalcClient for HttpCalcClient {
    async fn calculate(&self, request: &CalcRequest) -> Result<CalcResponse> {
        debug!("POST {} op={}", self.url, request.op);

        // .json() sets Content-Type: application/json
        let response = self.client.post(&self.url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            debug!("Server answered {} with {} bytes", status, body.len());
            return Err(Error::Server {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| Error::decode(e.to_string()))
    }
}
