use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::catalog::CatalogRepository;
use crate::paging::{Pager, PagerConfig};
use crate::ui::mvi::dispatch;

use super::intent::ListIntent;
use super::reducer::ListReducer;
use super::state::ListState;

const INTENT_CHANNEL_SIZE: usize = 8;

/// Receives [`ListIntent`]s and publishes [`ListState`].
///
/// State is published on a watch channel, so observers always read the latest
/// value and skip intermediate ones. The intent loop is aborted on drop.
pub struct ListViewModel {
    intents: mpsc::Sender<ListIntent>,
    state: watch::Receiver<ListState>,
    task: JoinHandle<()>,
}

impl ListViewModel {
    pub fn new(repository: CatalogRepository, pager_config: PagerConfig) -> Self {
        let (state_tx, state_rx) = watch::channel(ListState::default());
        let (intent_tx, mut intent_rx) = mpsc::channel::<ListIntent>(INTENT_CHANNEL_SIZE);
        let loopback = intent_tx.clone();

        let task = tokio::spawn(async move {
            while let Some(intent) = intent_rx.recv().await {
                match intent {
                    ListIntent::FetchList => {
                        tracing::info!("Fetching catalog list");
                        state_tx.send_modify(|state| {
                            dispatch::<ListReducer>(state, ListIntent::FetchList)
                        });
                        let items = Pager::new(repository.clone(), pager_config);
                        if loopback.send(ListIntent::ListLoaded(items)).await.is_err() {
                            break;
                        }
                    }
                    ListIntent::ListLoaded(items) => {
                        tracing::debug!(pager = items.id(), "List ready");
                        state_tx.send_modify(|state| {
                            dispatch::<ListReducer>(state, ListIntent::ListLoaded(items))
                        });
                    }
                }
            }
        });

        Self {
            intents: intent_tx,
            state: state_rx,
            task,
        }
    }

    pub fn intents(&self) -> mpsc::Sender<ListIntent> {
        self.intents.clone()
    }

    pub fn state(&self) -> watch::Receiver<ListState> {
        self.state.clone()
    }
}

impl Drop for ListViewModel {
    fn drop(&mut self) {
        self.task.abort();
    }
}
