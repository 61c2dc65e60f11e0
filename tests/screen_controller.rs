mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::{deps, eventually, item, items, repository, FakeCatalog};
use pokelist::catalog::{
    CatalogClient, CatalogError, CatalogItem, CatalogMapper, ItemDetail, MemoryCacheStore, Page,
    PageToken,
};
use pokelist::paging::{CombinedLoadStates, LoadState, Pager, PagerConfig};
use pokelist::ui::adapter::FooterState;
use pokelist::ui::controller::{ScreenController, ScreenDeps, ScreenView};
use pokelist::ui::detail::{DetailDialog, DetailPresenter};
use pokelist::ui::list::ListState;

/// Presenter that only records what it was asked to show.
#[derive(Default)]
struct RecordingPresenter {
    opened: Vec<CatalogItem>,
    open: bool,
}

impl DetailPresenter for RecordingPresenter {
    fn is_open(&self) -> bool {
        self.open
    }

    fn open(&mut self, item: CatalogItem) {
        self.opened.push(item);
        self.open = true;
    }

    fn close(&mut self) {
        self.open = false;
    }
}

fn refresh_error(reason: &str) -> CombinedLoadStates {
    CombinedLoadStates {
        refresh: LoadState::Error(reason.into()),
        append: LoadState::default(),
    }
}

fn pager(catalog: &Arc<FakeCatalog>) -> Pager {
    Pager::new(
        repository(catalog),
        PagerConfig {
            page_size: 10,
            prefetch_distance: 1,
        },
    )
}

#[tokio::test]
async fn loading_state_shows_indicator_regardless_of_load_state() {
    let mut view = ScreenView::default();
    assert!(view.is_loading_visible());

    view.render_load_states(&refresh_error("timeout"));
    assert!(!view.is_loading_visible());

    view.render_state(&ListState::Loading);
    assert!(view.is_loading_visible());
}

#[tokio::test]
async fn refresh_error_hides_indicator_before_list_ready() {
    let mut view = ScreenView::default();
    view.render_state(&ListState::Loading);
    view.render_load_states(&refresh_error("timeout"));

    assert!(!view.is_loading_visible());
    assert_eq!(view.adapter().item_count(), 0);
    assert!(view.adapter().items().is_none());
}

#[tokio::test]
async fn append_error_does_not_touch_indicator() {
    let mut view = ScreenView::default();
    view.render_load_states(&CombinedLoadStates {
        refresh: LoadState::default(),
        append: LoadState::Error("timeout".into()),
    });
    assert!(view.is_loading_visible());
}

#[tokio::test]
async fn last_list_ready_wins() {
    let catalog = FakeCatalog::new(items(3));
    let first = pager(&catalog);
    let second = pager(&catalog);
    let mut view = ScreenView::default();

    view.render_state(&ListState::ListReady(first));
    view.render_state(&ListState::Loading);
    view.render_state(&ListState::ListReady(second.clone()));

    assert!(!view.is_loading_visible());
    assert_eq!(view.adapter().items(), Some(&second));
    eventually(|| view.adapter().snapshot() == items(3)).await;
}

#[tokio::test]
async fn start_then_list_ready_shows_items_and_hides_indicator() {
    let catalog = FakeCatalog::new(vec![item(1), item(2)]);
    let mut controller = ScreenController::start(deps(&catalog, 10), RecordingPresenter::default());
    assert!(controller.is_loading_visible());

    controller.on_ready();
    eventually(|| {
        controller.sync();
        controller.adapter().item_count() == 2
    })
    .await;

    assert!(!controller.is_loading_visible());
    assert_eq!(controller.adapter().snapshot(), vec![item(1), item(2)]);
    assert!(matches!(controller.screen_state(), ListState::ListReady(_)));
}

#[tokio::test]
async fn refresh_timeout_hides_indicator_and_shows_no_items() {
    let catalog = FakeCatalog::new(vec![item(1), item(2)]);
    catalog.fail_next_page(CatalogError::Timeout { duration: 10 });
    let mut controller = ScreenController::start(deps(&catalog, 10), RecordingPresenter::default());

    controller.on_ready();
    eventually(|| {
        controller.sync();
        controller.adapter().load_states().refresh.is_error()
    })
    .await;

    assert!(!controller.is_loading_visible());
    assert_eq!(controller.adapter().item_count(), 0);
    assert_eq!(
        controller.adapter().footer(),
        FooterState::Error("timeout".into())
    );

    controller.retry();
    eventually(|| {
        controller.sync();
        controller.adapter().item_count() == 2
            && controller.adapter().footer() == FooterState::EndOfList
    })
    .await;
    assert_eq!(controller.adapter().snapshot(), vec![item(1), item(2)]);
}

#[tokio::test]
async fn fetch_list_is_sent_once() {
    let catalog = FakeCatalog::new(items(2));
    let mut controller = ScreenController::start(deps(&catalog, 10), RecordingPresenter::default());

    controller.on_ready();
    controller.on_ready();
    eventually(|| {
        controller.sync();
        controller.adapter().item_count() == 2
    })
    .await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    controller.sync();

    assert_eq!(catalog.page_calls(), 1);
}

#[tokio::test]
async fn selecting_twice_opens_one_detail() {
    let catalog = FakeCatalog::new(items(2));
    let mut controller = ScreenController::start(deps(&catalog, 10), RecordingPresenter::default());

    controller.on_item_selected(item(1));
    controller.on_item_selected(item(1));
    controller.on_item_selected(item(2));

    assert_eq!(controller.presenter().opened, vec![item(1)]);

    controller.presenter_mut().close();
    controller.on_item_selected(item(2));
    assert_eq!(controller.presenter().opened, vec![item(1), item(2)]);
}

#[tokio::test]
async fn activate_selection_opens_selected_item() {
    let catalog = FakeCatalog::new(items(3));
    let mut controller = ScreenController::start(deps(&catalog, 10), RecordingPresenter::default());
    controller.on_ready();
    eventually(|| {
        controller.sync();
        controller.adapter().item_count() == 3
    })
    .await;

    controller.adapter_mut().move_selection(1);
    controller.activate_selection();

    assert_eq!(controller.presenter().opened, vec![item(2)]);
}

#[tokio::test]
async fn scrolling_loads_following_pages() {
    let catalog = FakeCatalog::new(items(5));
    let mut controller = ScreenController::start(deps(&catalog, 2), RecordingPresenter::default());
    controller.adapter_mut().set_viewport_rows(10);
    controller.on_ready();
    eventually(|| {
        controller.sync();
        controller.adapter().item_count() == 2
    })
    .await;

    for _ in 0..4 {
        controller.adapter_mut().move_selection(1);
        let target = controller.adapter().selected_index() + 1;
        eventually(|| {
            controller.sync();
            controller.adapter().item_count() > target
                || controller.adapter().footer() == FooterState::EndOfList
        })
        .await;
    }

    assert_eq!(controller.adapter().snapshot(), items(5));
    assert_eq!(controller.adapter().selected_index(), 4);
}

#[tokio::test]
async fn detail_dialog_loads_detail_after_open() {
    let catalog = FakeCatalog::new(items(2));
    let dialog = DetailDialog::new(repository(&catalog));
    let mut controller = ScreenController::start(deps(&catalog, 10), dialog);

    controller.on_item_selected(item(2));
    controller.on_item_selected(item(2));
    eventually(|| {
        controller.sync();
        matches!(
            controller.presenter().state(),
            pokelist::ui::detail::DetailDialogState::Ready { .. }
        )
    })
    .await;

    assert_eq!(catalog.detail_calls(), 1);
}

/// Page fetches take `delay` and count how many started and finished.
struct SlowCatalog {
    delay: Duration,
    started: AtomicUsize,
    finished: AtomicUsize,
}

#[async_trait]
impl CatalogClient for SlowCatalog {
    async fn fetch_page(&self, _token: PageToken) -> Result<Page<CatalogItem>, CatalogError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(Page {
            items: items(2),
            next: None,
            total: Some(2),
        })
    }

    async fn fetch_detail(&self, id: u32) -> Result<ItemDetail, CatalogError> {
        Err(CatalogError::NotFound { id })
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dropping_controller_cancels_in_flight_fetch() {
    let catalog = Arc::new(SlowCatalog {
        delay: Duration::from_millis(200),
        started: AtomicUsize::new(0),
        finished: AtomicUsize::new(0),
    });
    let deps = ScreenDeps {
        client: catalog.clone(),
        cache: Arc::new(MemoryCacheStore::new()),
        mapper: CatalogMapper::default(),
        pager: PagerConfig::default(),
    };
    let mut controller = ScreenController::start(deps, RecordingPresenter::default());

    controller.on_ready();
    eventually(|| {
        controller.sync();
        catalog.started.load(Ordering::SeqCst) == 1
    })
    .await;
    assert!(controller.adapter().items().is_some());

    drop(controller);
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(catalog.started.load(Ordering::SeqCst), 1);
    assert_eq!(catalog.finished.load(Ordering::SeqCst), 0);
}
