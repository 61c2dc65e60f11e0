//! Remote catalog client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::timeout;

use crate::catalog::dto::{DetailResponse, PageResponse};
use crate::catalog::error::CatalogError;
use crate::catalog::model::{CatalogItem, ItemDetail, Page, PageToken};
use crate::config::ApiConfig;

/// Source of catalog pages and item details.
///
/// Implementations own transport concerns such as timeouts; callers only see
/// domain values or a [`CatalogError`].
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_page(&self, token: PageToken) -> Result<Page<CatalogItem>, CatalogError>;

    async fn fetch_detail(&self, id: u32) -> Result<ItemDetail, CatalogError>;
}

/// [`CatalogClient`] backed by a PokeAPI-compatible HTTP server.
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
    sprite_base_url: String,
    request_timeout: Duration,
}

impl HttpCatalogClient {
    pub fn new(config: &ApiConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .user_agent(concat!("pokelist/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sprite_base_url: config.sprite_base_url.clone(),
            request_timeout: Duration::from_secs(config.timeout_seconds.into()),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        not_found: Option<u32>,
    ) -> Result<T, CatalogError> {
        let request = async {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                if let Some(id) = not_found {
                    return Err(CatalogError::NotFound { id });
                }
            }
            if !status.is_success() {
                return Err(CatalogError::Upstream {
                    status: status.as_u16(),
                });
            }
            response
                .json::<T>()
                .await
                .map_err(|e| CatalogError::Decode(e.to_string()))
        };

        match timeout(self.request_timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(CatalogError::Timeout {
                duration: self.request_timeout.as_secs(),
            }),
        }
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_page(&self, token: PageToken) -> Result<Page<CatalogItem>, CatalogError> {
        let url = format!(
            "{}/pokemon?offset={}&limit={}",
            self.base_url, token.offset, token.limit
        );
        tracing::debug!(offset = token.offset, limit = token.limit, "Fetching page");
        let response: PageResponse = self.get_json(&url, None).await?;
        response.into_page(token, &self.sprite_base_url)
    }

    async fn fetch_detail(&self, id: u32) -> Result<ItemDetail, CatalogError> {
        let url = format!("{}/pokemon/{}", self.base_url, id);
        tracing::debug!(id, "Fetching detail");
        let response: DetailResponse = self.get_json(&url, Some(id)).await?;
        Ok(response.into())
    }
}
