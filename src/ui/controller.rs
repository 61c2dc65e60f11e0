//! Screen controller: wires collaborators to the list view model, binds the
//! adapter and forwards selections to the detail presenter.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::catalog::{CacheStore, CatalogClient, CatalogItem, CatalogMapper, CatalogRepository};
use crate::paging::{CombinedLoadStates, PagerConfig};
use crate::ui::adapter::ListAdapter;
use crate::ui::detail::DetailPresenter;
use crate::ui::list::{ListIntent, ListState, ListViewModel};

/// Collaborators handed to the controller at creation.
pub struct ScreenDeps {
    pub client: Arc<dyn CatalogClient>,
    pub cache: Arc<dyn CacheStore>,
    pub mapper: CatalogMapper,
    pub pager: PagerConfig,
}

impl ScreenDeps {
    pub fn repository(&self) -> CatalogRepository {
        CatalogRepository::new(
            Arc::clone(&self.client),
            Arc::clone(&self.cache),
            self.mapper.clone(),
        )
    }
}

/// The visible parts of the screen: the list adapter and the full-screen
/// loading indicator.
pub struct ScreenView {
    adapter: ListAdapter,
    loading_visible: bool,
}

impl Default for ScreenView {
    fn default() -> Self {
        Self::new(ListAdapter::new())
    }
}

impl ScreenView {
    /// The indicator starts visible.
    pub fn new(adapter: ListAdapter) -> Self {
        Self {
            adapter,
            loading_visible: true,
        }
    }

    pub fn render_state(&mut self, state: &ListState) {
        match state {
            ListState::Loading => self.loading_visible = true,
            ListState::ListReady(items) => {
                self.adapter.submit(items.clone());
                self.loading_visible = false;
            }
        }
    }

    /// A failed first load hides the indicator so the adapter footer's error
    /// and retry action show instead.
    pub fn render_load_states(&mut self, states: &CombinedLoadStates) {
        if states.refresh.is_error() {
            self.loading_visible = false;
        }
    }

    pub fn is_loading_visible(&self) -> bool {
        self.loading_visible
    }

    pub fn adapter(&self) -> &ListAdapter {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut ListAdapter {
        &mut self.adapter
    }
}

/// Lifecycle-bound controller for the list screen.
///
/// Both subscriptions are watch receivers: [`ScreenController::sync`] renders
/// only the newest value of each, skipping anything superseded since the last
/// call. Dropping the controller drops the view model, adapter and presenter,
/// which abort their background tasks.
pub struct ScreenController<P: DetailPresenter> {
    view: ScreenView,
    presenter: P,
    view_model: ListViewModel,
    intents: mpsc::Sender<ListIntent>,
    screen_state: watch::Receiver<ListState>,
    load_states: watch::Receiver<CombinedLoadStates>,
    fetch_sent: bool,
}

impl<P: DetailPresenter> ScreenController<P> {
    /// Build the adapter and view model and subscribe to both streams.
    pub fn start(deps: ScreenDeps, presenter: P) -> Self {
        let view = ScreenView::new(ListAdapter::new());
        let view_model = ListViewModel::new(deps.repository(), deps.pager);
        let intents = view_model.intents();
        let screen_state = view_model.state();
        let load_states = view.adapter().load_state_flow();

        Self {
            view,
            presenter,
            view_model,
            intents,
            screen_state,
            load_states,
            fetch_sent: false,
        }
    }

    /// Send the one `FetchList` for this screen. Later calls are no-ops.
    pub fn on_ready(&mut self) {
        if self.fetch_sent {
            return;
        }
        self.fetch_sent = true;
        if let Err(e) = self.intents.try_send(ListIntent::FetchList) {
            tracing::error!(error = %e, "Failed to send FetchList");
        }
    }

    /// Render the latest screen state and load states, then let the presenter
    /// apply finished work.
    pub fn sync(&mut self) {
        if self.screen_state.has_changed().unwrap_or(false) {
            let state = self.screen_state.borrow_and_update().clone();
            self.view.render_state(&state);
        }
        if self.load_states.has_changed().unwrap_or(false) {
            let states = self.load_states.borrow_and_update().clone();
            self.view.render_load_states(&states);
        }
        self.presenter.sync();
    }

    /// Open the detail view for `item` unless one is already open.
    pub fn on_item_selected(&mut self, item: CatalogItem) {
        if self.presenter.is_open() {
            tracing::debug!(id = item.id, "Detail already open, ignoring selection");
            return;
        }
        self.presenter.open(item);
    }

    /// Select the item under the cursor.
    pub fn activate_selection(&mut self) {
        if let Some(item) = self.view.adapter().selected_item() {
            self.on_item_selected(item);
        }
    }

    pub fn retry(&self) {
        self.view.adapter().retry();
    }

    pub fn adapter(&self) -> &ListAdapter {
        self.view.adapter()
    }

    pub fn adapter_mut(&mut self) -> &mut ListAdapter {
        self.view.adapter_mut()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn is_loading_visible(&self) -> bool {
        self.view.is_loading_visible()
    }

    pub fn screen_state(&self) -> ListState {
        self.view_model.state().borrow().clone()
    }
}
