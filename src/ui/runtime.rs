use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{
    CacheStore, CatalogClient, CatalogError, CatalogMapper, FileCacheStore, HttpCatalogClient,
    MemoryCacheStore,
};
use crate::config::Config;
use crate::paging::PagerConfig;
use crate::ui::app::App;
use crate::ui::controller::{ScreenController, ScreenDeps};
use crate::ui::detail::DetailDialog;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;

/// Construct the screen's collaborators from configuration.
pub fn build_deps(config: &Config) -> Result<ScreenDeps, CatalogError> {
    let client: Arc<dyn CatalogClient> = Arc::new(HttpCatalogClient::new(&config.api)?);
    let cache: Arc<dyn CacheStore> = if config.cache.enabled {
        let dir = config
            .cache
            .dir
            .clone()
            .unwrap_or_else(FileCacheStore::default_dir);
        tracing::info!(dir = %dir.display(), "Using file cache");
        Arc::new(FileCacheStore::new(dir))
    } else {
        Arc::new(MemoryCacheStore::new())
    };

    Ok(ScreenDeps {
        client,
        cache,
        mapper: CatalogMapper::new(config.cache.max_age()),
        pager: PagerConfig {
            page_size: config.paging.page_size,
            prefetch_distance: config.paging.prefetch_distance,
        },
    })
}

/// Run the list screen until the user quits. Must be called inside a tokio
/// runtime context.
pub fn run(config: &Config) -> anyhow::Result<()> {
    let deps = build_deps(config)?;
    let presenter = DetailDialog::new(deps.repository());
    let controller = ScreenController::start(deps, presenter);
    let mut app = App::new(controller);

    let (mut terminal, guard) = setup_terminal()?;
    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms);
    if let Ok((cols, rows)) = crossterm::terminal::size() {
        app.on_resize(cols, rows);
    }
    let events = EventHandler::new(tick_rate)?;
    app.on_ready();

    loop {
        app.sync();
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Tick) => app.on_tick(),
            Ok(AppEvent::Resize(cols, rows)) => app.on_resize(cols, rows),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    tracing::info!("Exiting");
    drop(guard);
    Ok(())
}
