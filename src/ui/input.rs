use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::app::App;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') {
        app.request_quit();
        return;
    }

    if app.popup_open() {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_popup(),
            KeyCode::Char('r') => app.controller_mut().presenter_mut().retry(),
            _ => {}
        }
        return;
    }

    let controller = app.controller_mut();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => controller.adapter_mut().move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => controller.adapter_mut().move_selection(1),
        KeyCode::PageUp => controller.adapter_mut().page_up(),
        KeyCode::PageDown => controller.adapter_mut().page_down(),
        KeyCode::Home | KeyCode::Char('g') => controller.adapter_mut().select_first(),
        KeyCode::End | KeyCode::Char('G') => controller.adapter_mut().select_last(),
        KeyCode::Enter => controller.activate_selection(),
        KeyCode::Char('r') => controller.retry(),
        KeyCode::Esc | KeyCode::Char('q') => app.request_quit(),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&needle))
}
