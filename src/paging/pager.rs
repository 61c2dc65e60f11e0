//! Lazily loaded, incrementally appended item list.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::catalog::{CatalogError, CatalogItem, CatalogRepository, Page, PageToken};
use crate::paging::load_state::{CombinedLoadStates, LoadState};

static NEXT_PAGER_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy)]
pub struct PagerConfig {
    pub page_size: u32,
    /// Start loading the next page when an item this close to the end is accessed.
    pub prefetch_distance: usize,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            prefetch_distance: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadKind {
    Refresh,
    Append,
}

#[derive(Default)]
struct PagerState {
    items: Vec<CatalogItem>,
    next: Option<PageToken>,
    total: Option<u32>,
    started: bool,
    failed: Option<LoadKind>,
    in_flight: Option<JoinHandle<()>>,
}

struct PagerInner {
    id: u64,
    repository: CatalogRepository,
    config: PagerConfig,
    state: Mutex<PagerState>,
    load_states: watch::Sender<CombinedLoadStates>,
}

impl Drop for PagerInner {
    fn drop(&mut self) {
        if let Some(handle) = self.state.get_mut().in_flight.take() {
            handle.abort();
        }
    }
}

/// Paging coordinator.
///
/// Nothing is fetched until [`Pager::start`]. After that, pages are loaded
/// one at a time on the tokio runtime and failures are reported on the
/// load-state stream; [`Pager::retry`] re-runs the failed load. Clones share
/// the same list and compare equal.
#[derive(Clone)]
pub struct Pager {
    inner: Arc<PagerInner>,
}

impl PartialEq for Pager {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for Pager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("id", &self.inner.id)
            .field("len", &self.len())
            .finish()
    }
}

impl Pager {
    pub fn new(repository: CatalogRepository, config: PagerConfig) -> Self {
        let (load_states, _) = watch::channel(CombinedLoadStates::default());
        Self {
            inner: Arc::new(PagerInner {
                id: NEXT_PAGER_ID.fetch_add(1, Ordering::Relaxed),
                repository,
                config,
                state: Mutex::new(PagerState::default()),
                load_states,
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Begin loading the first page. Later calls are no-ops.
    pub fn start(&self) {
        {
            let mut state = self.inner.state.lock();
            if state.started {
                return;
            }
            state.started = true;
        }
        self.launch(LoadKind::Refresh);
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the whole remote list, once a page has reported it.
    pub fn total(&self) -> Option<u32> {
        self.inner.state.lock().total
    }

    /// Item at `index` without triggering a load.
    pub fn peek(&self, index: usize) -> Option<CatalogItem> {
        self.inner.state.lock().items.get(index).cloned()
    }

    /// Item at `index`; loads the next page when `index` is within the
    /// prefetch distance of the end.
    pub fn access(&self, index: usize) -> Option<CatalogItem> {
        let (item, near_end) = {
            let state = self.inner.state.lock();
            let near_end =
                index.saturating_add(self.inner.config.prefetch_distance) >= state.items.len();
            (state.items.get(index).cloned(), near_end)
        };
        if near_end {
            self.load_next();
        }
        item
    }

    /// Items in `start..end`, clamped to the loaded length.
    pub fn window(&self, start: usize, end: usize) -> Vec<CatalogItem> {
        let state = self.inner.state.lock();
        let end = end.min(state.items.len());
        let start = start.min(end);
        state.items[start..end].to_vec()
    }

    pub fn items(&self) -> Vec<CatalogItem> {
        self.inner.state.lock().items.clone()
    }

    pub fn load_states(&self) -> watch::Receiver<CombinedLoadStates> {
        self.inner.load_states.subscribe()
    }

    pub fn current_load_states(&self) -> CombinedLoadStates {
        self.inner.load_states.borrow().clone()
    }

    /// Load the following page if one exists and nothing is pending.
    pub fn load_next(&self) {
        let states = self.current_load_states();
        if !matches!(states.refresh, LoadState::Idle { .. })
            || !matches!(states.append, LoadState::Idle { end_of_list: false })
        {
            return;
        }
        {
            let state = self.inner.state.lock();
            if !state.started || state.next.is_none() || state.in_flight_running() {
                return;
            }
        }
        self.launch(LoadKind::Append);
    }

    /// Re-run the load that failed last. No-op when nothing failed.
    pub fn retry(&self) {
        let failed = self.inner.state.lock().failed.take();
        match failed {
            Some(kind) => {
                tracing::info!(pager = self.inner.id, ?kind, "Retrying failed load");
                self.launch(kind);
            }
            None => tracing::debug!(pager = self.inner.id, "Retry ignored, nothing failed"),
        }
    }

    fn launch(&self, kind: LoadKind) {
        let token = {
            let state = self.inner.state.lock();
            match kind {
                LoadKind::Refresh => PageToken::first(self.inner.config.page_size),
                LoadKind::Append => match state.next {
                    Some(token) => token,
                    None => return,
                },
            }
        };

        self.inner.load_states.send_modify(|states| match kind {
            LoadKind::Refresh => {
                states.refresh = LoadState::Loading;
                states.append = LoadState::default();
            }
            LoadKind::Append => states.append = LoadState::Loading,
        });

        let repository = self.inner.repository.clone();
        let weak: Weak<PagerInner> = Arc::downgrade(&self.inner);
        let handle = tokio::spawn(async move {
            let result = repository.load_page(token).await;
            if let Some(inner) = weak.upgrade() {
                Pager { inner }.complete(kind, token, result);
            }
        });

        let mut state = self.inner.state.lock();
        if let Some(previous) = state.in_flight.replace(handle) {
            previous.abort();
        }
    }

    /// Apply a finished load. The item list and the published load states
    /// change under one lock, so a `retry` or `load_next` never observes one
    /// without the other.
    fn complete(
        &self,
        kind: LoadKind,
        token: PageToken,
        result: Result<Page<CatalogItem>, CatalogError>,
    ) {
        let mut state = self.inner.state.lock();
        state.in_flight = None;
        match result {
            Ok(page) => {
                let end_of_list = page.next.is_none();
                if kind == LoadKind::Refresh {
                    state.items.clear();
                }
                state.items.extend(page.items);
                state.next = page.next;
                state.total = page.total.or(state.total);
                state.failed = None;
                self.inner.load_states.send_modify(|states| {
                    if kind == LoadKind::Refresh {
                        states.refresh = LoadState::Idle { end_of_list: false };
                    }
                    states.append = LoadState::Idle { end_of_list };
                });
                tracing::debug!(
                    pager = self.inner.id,
                    offset = token.offset,
                    end_of_list,
                    "Page loaded"
                );
            }
            Err(err) => {
                state.failed = Some(kind);
                let reason = err.user_message();
                self.inner.load_states.send_modify(|states| match kind {
                    LoadKind::Refresh => states.refresh = LoadState::Error(reason),
                    LoadKind::Append => states.append = LoadState::Error(reason),
                });
                tracing::warn!(
                    pager = self.inner.id,
                    offset = token.offset,
                    error = %err,
                    "Page load failed"
                );
            }
        }
    }
}

impl PagerState {
    fn in_flight_running(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::catalog::{CatalogClient, CatalogMapper, ItemDetail, MemoryCacheStore};

    /// First page request times out; every later one never finishes.
    #[derive(Default)]
    struct FailsThenHangs {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogClient for FailsThenHangs {
        async fn fetch_page(&self, _token: PageToken) -> Result<Page<CatalogItem>, CatalogError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(CatalogError::Timeout { duration: 1 });
            }
            std::future::pending().await
        }

        async fn fetch_detail(&self, id: u32) -> Result<ItemDetail, CatalogError> {
            Err(CatalogError::NotFound { id })
        }
    }

    fn pager() -> Pager {
        let repository = CatalogRepository::new(
            Arc::new(FailsThenHangs::default()),
            Arc::new(MemoryCacheStore::new()),
            CatalogMapper::default(),
        );
        Pager::new(repository, PagerConfig::default())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn retry_as_soon_as_failure_is_recorded_stays_loading() {
        for _ in 0..20 {
            let pager = pager();
            pager.start();
            while pager.inner.state.lock().failed.is_none() {
                tokio::task::yield_now().await;
            }

            pager.retry();
            tokio::time::sleep(Duration::from_millis(5)).await;

            assert_eq!(pager.current_load_states().refresh, LoadState::Loading);
        }
    }
}
