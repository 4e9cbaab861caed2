//! reqwest implementation of [`AnalyticsApi`].

use crate::api::{
    AnalyticsApi, MetadataKind, PriceQuery, ProductionQuery, ProductionUpload, UploadFile,
    UploadReceipt,
};
use crate::config::ApiConfig;
use crate::envelope::{decode_payload, decode_receipt, error_message};
use agrimon_common::{AgriError, PriceFluctuation, ProductionGrouping, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

const PRICE_PATH: &str = "api/analyze/fluktuasi-harga";
const PRODUCTION_PATH: &str = "api/analyze/pengelompokan-produksi";
const UPLOAD_PRICE_PATH: &str = "api/upload/harga";
const UPLOAD_PRODUCTION_PATH: &str = "api/upload/produksi";

/// HTTP client for the analytics backend.
///
/// One request per call; failures are returned as they happen, without retry.
#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    client: Client,
    config: ApiConfig,
}

impl AnalyticsClient {
    /// Create a client with the given configuration
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut builder = Client::builder().pool_max_idle_per_host(config.max_idle_per_host);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AgriError::network_with_source("Failed to create HTTP client", e))?;
        Ok(Self { client, config })
    }

    /// Create a client for `base_url` with default settings
    pub fn with_defaults(base_url: &str) -> Result<Self> {
        Self::new(ApiConfig::new(base_url)?)
    }

    /// The configuration in use.
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[instrument(skip(self, params), fields(path = %path))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T> {
        let url = self.config.endpoint(path)?;
        debug!(%url, params = params.len(), "Sending request");

        let response = self.client.get(url).query(params).send().await?;
        let status = response.status();
        let body = read_body(response).await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Analytics request failed");
            let message = error_message(&body)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            return Err(AgriError::api_with_status(message, status.as_u16()));
        }
        decode_payload(&body)
    }

    #[instrument(skip(self, form), fields(path = %path))]
    async fn post_upload(&self, path: &str, form: Form) -> Result<UploadReceipt> {
        let url = self.config.endpoint(path)?;
        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();
        let body = read_body(response).await?;

        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| format!("Upload failed with status {}", status.as_u16()));
            warn!(status = status.as_u16(), message = %message, "Upload rejected");
            return Err(AgriError::api_with_status(message, status.as_u16()));
        }

        let receipt = decode_receipt(&body).inspect_err(|e| {
            warn!(status = status.as_u16(), error = %e, "Upload reply rejected");
        })?;
        info!(status = status.as_u16(), "Upload accepted");
        Ok(receipt)
    }
}

async fn read_body(response: Response) -> Result<String> {
    response
        .text()
        .await
        .map_err(|e| AgriError::network_with_source("Failed to read response body", e))
}

fn file_part(file: UploadFile) -> Part {
    Part::bytes(file.bytes).file_name(file.file_name)
}

/// Option values arrive as strings or numbers; render both as text.
fn option_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[async_trait]
impl AnalyticsApi for AnalyticsClient {
    #[instrument(skip(self), fields(komoditas = %query.komoditas, tahun = query.tahun))]
    async fn price_fluctuation(&self, query: &PriceQuery) -> Result<PriceFluctuation> {
        info!("Fetching price fluctuation");
        self.get_json(PRICE_PATH, &query.params()).await
    }

    #[instrument(skip(self), fields(komoditas = %query.komoditas, tahun = query.tahun))]
    async fn production_grouping(&self, query: &ProductionQuery) -> Result<ProductionGrouping> {
        info!(periode = %query.periode, "Fetching production grouping");
        self.get_json(PRODUCTION_PATH, &query.params()).await
    }

    #[instrument(skip(self))]
    async fn metadata(&self, kind: MetadataKind) -> Result<Vec<String>> {
        let values: Vec<Value> = self.get_json(&kind.path(), &[]).await?;
        Ok(values.into_iter().filter_map(option_text).collect())
    }

    #[instrument(skip(self, file), fields(file_name = %file.file_name, size = file.len()))]
    async fn upload_price(&self, file: UploadFile) -> Result<UploadReceipt> {
        let form = Form::new().part("file", file_part(file));
        self.post_upload(UPLOAD_PRICE_PATH, form).await
    }

    #[instrument(
        skip(self, upload),
        fields(
            file_name = %upload.file.file_name,
            komoditas = %upload.komoditas,
            tahun = upload.tahun
        )
    )]
    async fn upload_production(&self, upload: ProductionUpload) -> Result<UploadReceipt> {
        let form = Form::new()
            .part("file", file_part(upload.file))
            .text("komoditas", upload.komoditas)
            .text("tahun", upload.tahun.to_string());
        self.post_upload(UPLOAD_PRODUCTION_PATH, form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_option_text() {
        assert_eq!(option_text(json!("Beras")), Some("Beras".to_string()));
        assert_eq!(option_text(json!(2024)), Some("2024".to_string()));
        assert_eq!(option_text(json!(null)), None);
    }

    #[test]
    fn test_client_creation() {
        let client = AnalyticsClient::with_defaults("http://localhost:8000").unwrap();
        assert_eq!(client.config().max_idle_per_host, 10);
        assert!(AnalyticsClient::with_defaults("::").is_err());
    }
}
