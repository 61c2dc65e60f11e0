//! Combines the remote client, local cache and mapper.

use std::sync::Arc;
use std::time::SystemTime;

use crate::catalog::cache::CacheStore;
use crate::catalog::client::CatalogClient;
use crate::catalog::error::CatalogError;
use crate::catalog::mapper::CatalogMapper;
use crate::catalog::model::{CatalogItem, ItemDetail, Page, PageToken};

/// Single access point for catalog data used by the pager and detail view.
///
/// Pages are fetched remotely and written through to the cache; a cached page
/// only stands in when the remote call fails with a recoverable error.
/// Details never change, so the cache is consulted first.
#[derive(Clone)]
pub struct CatalogRepository {
    client: Arc<dyn CatalogClient>,
    cache: Arc<dyn CacheStore>,
    mapper: CatalogMapper,
}

impl CatalogRepository {
    pub fn new(
        client: Arc<dyn CatalogClient>,
        cache: Arc<dyn CacheStore>,
        mapper: CatalogMapper,
    ) -> Self {
        Self {
            client,
            cache,
            mapper,
        }
    }

    pub async fn load_page(&self, token: PageToken) -> Result<Page<CatalogItem>, CatalogError> {
        match self.client.fetch_page(token).await {
            Ok(page) => {
                let record = self.mapper.page_to_record(token, &page, SystemTime::now());
                if let Err(e) = self.cache.write_page(&record) {
                    tracing::warn!(offset = token.offset, error = %e, "Failed to cache page");
                }
                Ok(page)
            }
            Err(err) if err.allows_cache_fallback() => {
                let cached = self
                    .cache
                    .read_page(token)
                    .unwrap_or_else(|e| {
                        tracing::warn!(offset = token.offset, error = %e, "Cache read failed");
                        None
                    })
                    .and_then(|record| self.mapper.record_to_page(record, SystemTime::now()));
                match cached {
                    Some(page) => {
                        tracing::info!(
                            offset = token.offset,
                            error = %err,
                            "Serving cached page after remote failure"
                        );
                        Ok(page)
                    }
                    None => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    pub async fn load_detail(&self, id: u32) -> Result<ItemDetail, CatalogError> {
        match self.cache.read_detail(id) {
            Ok(Some(record)) => {
                if let Some(detail) = self.mapper.record_to_detail(record, SystemTime::now()) {
                    tracing::debug!(id, "Detail served from cache");
                    return Ok(detail);
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(id, error = %e, "Cache read failed"),
        }

        let detail = self.client.fetch_detail(id).await?;
        if detail.id != id {
            tracing::warn!(id, returned = detail.id, "Detail response for a different item");
            return Err(CatalogError::Decode(format!(
                "requested item {id}, got item {}",
                detail.id
            )));
        }
        let record = self.mapper.detail_to_record(&detail, SystemTime::now());
        if let Err(e) = self.cache.write_detail(&record) {
            tracing::warn!(id, error = %e, "Failed to cache detail");
        }
        Ok(detail)
    }
}
