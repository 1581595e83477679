use std::time::Duration;

use serde::de::DeserializeOwned;
use wreq::Client;

use crate::error::{self, RentalError};
use crate::filters::SearchFilters;
use crate::model::{ApiResponse, Filters};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub base_url: String,
    pub proxy: Option<String>,
    pub timeout: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            proxy: None,
            timeout: 30,
        }
    }
}

/// The only point of contact with the upstream car-listing API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(options: &FetchOptions) -> Result<Self, RentalError> {
        let mut builder = Client::builder().timeout(Duration::from_secs(options.timeout));

        if let Some(ref proxy) = options.proxy {
            builder = builder.proxy(wreq::Proxy::all(proxy).map_err(error::from_http_error)?);
        }

        let client = builder.build().map_err(error::from_http_error)?;

        Ok(Self {
            client,
            base_url: options.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_cars(&self, filters: &SearchFilters) -> Result<ApiResponse, RentalError> {
        let params = filters.to_api_params();
        tracing::debug!(?params, "fetching cars");
        let response: ApiResponse = self.get_json("/cars/", &params).await?;
        tracing::debug!(
            count = response.count,
            page = response.page,
            total_pages = response.total_pages,
            "cars fetched"
        );
        Ok(response)
    }

    pub async fn fetch_filters(&self) -> Result<Filters, RentalError> {
        tracing::debug!("fetching filter vocabulary");
        self.get_json("/filters/", &[]).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, RentalError> {
        let url = format!("{}{path}", self.base_url);

        let response = self
            .client
            .get(url.as_str())
            .query(&params)
            .send()
            .await
            .map_err(error::from_http_error)?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(RentalError::HttpStatus(status));
        }

        let body = response.text().await.map_err(error::from_http_error)?;
        serde_json::from_str(&body).map_err(|e| RentalError::Decode(e.to_string()))
    }
}
