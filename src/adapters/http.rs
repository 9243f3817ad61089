use crate::config::Endpoints;
use crate::core::{ConfigProvider, DataSource};
use crate::domain::model::{Anmeldung, Dozent, Kurs, Raum, Teilnehmer};
use crate::utils::error::{DashboardError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

/// Reads the collections from the REST API of the course service.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: Client,
    base_url: Url,
    endpoints: Endpoints,
    headers: Vec<(String, String)>,
}

impl HttpDataSource {
    pub fn new(base_url: &str, endpoints: Endpoints) -> Result<Self> {
        // 確保 base URL 以 / 結尾，否則 join 會取代最後一段路徑
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url = Url::parse(&normalized).map_err(|e| DashboardError::InvalidConfigValueError {
            field: "api_base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        Ok(Self {
            client: Client::new(),
            base_url,
            endpoints,
            headers: Vec::new(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self::new(config.api_base_url(), config.endpoints().clone())?.with_headers(config.headers()))
    }

    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| DashboardError::InvalidConfigValueError {
                field: "endpoints".to_string(),
                value: path.to_string(),
                reason: format!("Cannot join with base URL: {}", e),
            })
    }

    async fn fetch_collection<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = self.url_for(path)?;
        tracing::debug!("Making API request to: {}", url);

        let mut request = self.client.get(url.clone());
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        tracing::debug!("API response status for {}: {}", path, response.status());
        let response = response.error_for_status()?;

        let json_data: serde_json::Value = response.json().await?;
        let serde_json::Value::Array(items) = json_data else {
            return Err(DashboardError::PayloadError {
                endpoint: path.to_string(),
                message: "expected a JSON array".to_string(),
            });
        };

        let records = items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<T>, _>>()?;

        tracing::debug!("Fetched {} records from {}", records.len(), path);
        Ok(records)
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch_dozenten(&self) -> Result<Vec<Dozent>> {
        self.fetch_collection(&self.endpoints.dozenten).await
    }

    async fn fetch_teilnehmer(&self) -> Result<Vec<Teilnehmer>> {
        self.fetch_collection(&self.endpoints.teilnehmer).await
    }

    async fn fetch_raeume(&self) -> Result<Vec<Raum>> {
        self.fetch_collection(&self.endpoints.raeume).await
    }

    async fn fetch_kurse(&self) -> Result<Vec<Kurs>> {
        self.fetch_collection(&self.endpoints.kurse).await
    }

    async fn fetch_anmeldungen(&self) -> Result<Vec<Anmeldung>> {
        self.fetch_collection(&self.endpoints.anmeldungen).await
    }
}
