use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::task::JoinHandle;

use crate::catalog::{CatalogError, CatalogItem, CatalogRepository, ItemDetail};
use crate::ui::mvi::dispatch;

use super::intent::DetailIntent;
use super::reducer::DetailReducer;
use super::state::DetailDialogState;

/// Capability to present one catalog item in a modal view.
pub trait DetailPresenter {
    fn is_open(&self) -> bool;

    fn open(&mut self, item: CatalogItem);

    fn close(&mut self);

    /// Apply results of background work. Called once per UI tick.
    fn sync(&mut self) {}
}

/// Requested id and the outcome of loading it.
type DetailResult = (u32, Result<ItemDetail, CatalogError>);

/// Detail popup that loads the full record through the repository.
pub struct DetailDialog {
    state: DetailDialogState,
    repository: CatalogRepository,
    pending: Option<oneshot::Receiver<DetailResult>>,
    task: Option<JoinHandle<()>>,
}

impl DetailDialog {
    pub fn new(repository: CatalogRepository) -> Self {
        Self {
            state: DetailDialogState::default(),
            repository,
            pending: None,
            task: None,
        }
    }

    pub fn state(&self) -> &DetailDialogState {
        &self.state
    }

    pub fn on_tick(&mut self) {
        dispatch::<DetailReducer>(&mut self.state, DetailIntent::AnimationTick);
    }

    /// Reload a detail that failed. No-op in any other state.
    pub fn retry(&mut self) {
        let id = match &self.state {
            DetailDialogState::Failed { item, .. } => item.id,
            _ => return,
        };
        dispatch::<DetailReducer>(&mut self.state, DetailIntent::RetryClicked);
        self.load(id);
    }

    fn load(&mut self, id: u32) {
        self.cancel();
        let (tx, rx) = oneshot::channel();
        let repository = self.repository.clone();
        self.task = Some(tokio::spawn(async move {
            let _ = tx.send((id, repository.load_detail(id).await));
        }));
        self.pending = Some(rx);
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.pending = None;
    }
}

impl DetailPresenter for DetailDialog {
    fn is_open(&self) -> bool {
        self.state.is_visible()
    }

    fn open(&mut self, item: CatalogItem) {
        tracing::debug!(id = item.id, "Opening detail");
        let id = item.id;
        dispatch::<DetailReducer>(&mut self.state, DetailIntent::Open { item });
        self.load(id);
    }

    fn close(&mut self) {
        self.cancel();
        dispatch::<DetailReducer>(&mut self.state, DetailIntent::Close);
    }

    fn sync(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };
        let intent = match rx.try_recv() {
            Ok((id, Ok(detail))) => DetailIntent::Loaded { id, detail },
            Ok((_, Err(err))) => {
                tracing::warn!(error = %err, "Detail load failed");
                DetailIntent::LoadFailed {
                    message: err.user_message(),
                }
            }
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => DetailIntent::LoadFailed {
                message: "cancelled".to_string(),
            },
        };
        self.pending = None;
        self.task = None;
        dispatch::<DetailReducer>(&mut self.state, intent);
    }
}

impl Drop for DetailDialog {
    fn drop(&mut self) {
        self.cancel();
    }
}
