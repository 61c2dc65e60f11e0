use ratatui::layout::Rect;

use crate::ui::controller::ScreenController;
use crate::ui::detail::{DetailDialog, DetailPresenter};
use crate::ui::layout::list_rows;

/// Top-level UI state owned by the run loop.
pub struct App {
    should_quit: bool,
    controller: ScreenController<DetailDialog>,
    animation_tick: u8,
}

impl App {
    pub fn new(controller: ScreenController<DetailDialog>) -> Self {
        Self {
            should_quit: false,
            controller,
            animation_tick: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn on_ready(&mut self) {
        self.controller.on_ready();
    }

    /// Pull the latest state from background work.
    pub fn sync(&mut self) {
        self.controller.sync();
    }

    pub fn on_tick(&mut self) {
        self.animation_tick = self.animation_tick.wrapping_add(1);
        self.controller.presenter_mut().on_tick();
    }

    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        let rows = list_rows(Rect::new(0, 0, cols, rows));
        self.controller.adapter_mut().set_viewport_rows(rows);
    }

    pub fn animation_tick(&self) -> u8 {
        self.animation_tick
    }

    pub fn popup_open(&self) -> bool {
        self.controller.presenter().is_open()
    }

    pub fn close_popup(&mut self) {
        self.controller.presenter_mut().close();
    }

    pub fn controller(&self) -> &ScreenController<DetailDialog> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ScreenController<DetailDialog> {
        &mut self.controller
    }
}
