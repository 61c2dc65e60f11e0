//! Shared test utilities: an in-process catalog and polling helpers.

#![allow(dead_code)]

pub mod mock_server;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use pokelist::catalog::{
    CatalogClient, CatalogError, CatalogItem, CatalogMapper, CatalogRepository, ItemDetail,
    MemoryCacheStore, Page, PageToken, Stat,
};
use pokelist::paging::PagerConfig;
use pokelist::ui::controller::ScreenDeps;

pub fn item(id: u32) -> CatalogItem {
    CatalogItem {
        id,
        name: format!("item-{id}"),
        thumbnail_url: format!("https://img.test/{id}.png"),
    }
}

pub fn items(count: u32) -> Vec<CatalogItem> {
    (1..=count).map(item).collect()
}

/// Catalog client serving a fixed list, with scripted failures.
pub struct FakeCatalog {
    items: Vec<CatalogItem>,
    page_failures: Mutex<VecDeque<CatalogError>>,
    detail_failures: Mutex<VecDeque<CatalogError>>,
    page_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    detail_id_shift: AtomicU32,
}

impl FakeCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Arc<Self> {
        Arc::new(Self {
            items,
            page_failures: Mutex::new(VecDeque::new()),
            detail_failures: Mutex::new(VecDeque::new()),
            page_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            detail_id_shift: AtomicU32::new(0),
        })
    }

    /// The next `fetch_page` call fails with `err`.
    pub fn fail_next_page(&self, err: CatalogError) {
        self.page_failures.lock().push_back(err);
    }

    pub fn fail_next_detail(&self, err: CatalogError) {
        self.detail_failures.lock().push_back(err);
    }

    /// Details come back labelled with `id + shift` instead of the requested id.
    pub fn shift_detail_ids(&self, shift: u32) {
        self.detail_id_shift.store(shift, Ordering::SeqCst);
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn fetch_page(&self, token: PageToken) -> Result<Page<CatalogItem>, CatalogError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.page_failures.lock().pop_front() {
            return Err(err);
        }
        let start = (token.offset as usize).min(self.items.len());
        let end = (start + token.limit as usize).min(self.items.len());
        let next = (end < self.items.len()).then(|| token.following());
        Ok(Page {
            items: self.items[start..end].to_vec(),
            next,
            total: Some(self.items.len() as u32),
        })
    }

    async fn fetch_detail(&self, id: u32) -> Result<ItemDetail, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.detail_failures.lock().pop_front() {
            return Err(err);
        }
        let item = self
            .items
            .iter()
            .find(|item| item.id == id)
            .ok_or(CatalogError::NotFound { id })?;
        Ok(ItemDetail {
            id: id + self.detail_id_shift.load(Ordering::SeqCst),
            name: item.name.clone(),
            height: 7,
            weight: 69,
            base_experience: Some(64),
            types: vec!["grass".into()],
            abilities: vec!["overgrow".into()],
            stats: vec![Stat {
                name: "hp".into(),
                value: 45,
            }],
            sprite_url: Some(item.thumbnail_url.clone()),
        })
    }
}

pub fn repository(catalog: &Arc<FakeCatalog>) -> CatalogRepository {
    CatalogRepository::new(
        catalog.clone(),
        Arc::new(MemoryCacheStore::new()),
        CatalogMapper::default(),
    )
}

pub fn deps(catalog: &Arc<FakeCatalog>, page_size: u32) -> ScreenDeps {
    ScreenDeps {
        client: catalog.clone(),
        cache: Arc::new(MemoryCacheStore::new()),
        mapper: CatalogMapper::default(),
        pager: PagerConfig {
            page_size,
            prefetch_distance: 1,
        },
    }
}

/// Poll `check` until it holds, yielding to background tasks in between.
pub async fn eventually<F: FnMut() -> bool>(mut check: F) {
    for _ in 0..400 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not met within 2s");
}
