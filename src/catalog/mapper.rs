//! Mapping between domain values and persisted cache records.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::catalog::model::{CatalogItem, ItemDetail, Page, PageToken};

/// A page as stored in the local cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub offset: u32,
    pub limit: u32,
    pub items: Vec<CatalogItem>,
    /// Offset of the following page; absent on the last page.
    #[serde(default)]
    pub next_offset: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
    /// Seconds since the Unix epoch.
    pub fetched_at: u64,
}

/// An item detail as stored in the local cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub detail: ItemDetail,
    pub fetched_at: u64,
}

/// Converts fetched values into cache records and back.
///
/// Records older than `max_age` are treated as absent when read back.
#[derive(Debug, Clone, Default)]
pub struct CatalogMapper {
    max_age: Option<Duration>,
}

impl CatalogMapper {
    pub fn new(max_age: Option<Duration>) -> Self {
        Self { max_age }
    }

    pub fn page_to_record(
        &self,
        token: PageToken,
        page: &Page<CatalogItem>,
        now: SystemTime,
    ) -> PageRecord {
        PageRecord {
            offset: token.offset,
            limit: token.limit,
            items: page.items.clone(),
            next_offset: page.next.map(|next| next.offset),
            total: page.total,
            fetched_at: epoch_secs(now),
        }
    }

    pub fn record_to_page(&self, record: PageRecord, now: SystemTime) -> Option<Page<CatalogItem>> {
        if self.is_stale(record.fetched_at, now) {
            return None;
        }
        let limit = record.limit;
        Some(Page {
            items: record.items,
            next: record.next_offset.map(|offset| PageToken { offset, limit }),
            total: record.total,
        })
    }

    pub fn detail_to_record(&self, detail: &ItemDetail, now: SystemTime) -> DetailRecord {
        DetailRecord {
            detail: detail.clone(),
            fetched_at: epoch_secs(now),
        }
    }

    pub fn record_to_detail(&self, record: DetailRecord, now: SystemTime) -> Option<ItemDetail> {
        if self.is_stale(record.fetched_at, now) {
            return None;
        }
        Some(record.detail)
    }

    fn is_stale(&self, fetched_at: u64, now: SystemTime) -> bool {
        match self.max_age {
            Some(max_age) => epoch_secs(now).saturating_sub(fetched_at) > max_age.as_secs(),
            None => false,
        }
    }
}

fn epoch_secs(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs()
}
