use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::ui::adapter::{FooterState, ListAdapter};
use crate::ui::app::App;
use crate::ui::detail::render_detail_dialog;
use crate::ui::header::Header;
use crate::ui::layout::{centered_rect_by_size, layout_regions};
use crate::ui::status_bar::StatusBar;
use crate::ui::theme::{
    spinner, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, POPUP_BORDER,
    STATUS_ERROR, STATUS_OK,
};

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);
    let controller = app.controller();
    let adapter = controller.adapter();

    frame.render_widget(
        Header::new().widget(adapter.item_count(), &adapter.load_states().refresh),
        header,
    );

    frame.render_widget(Clear, body);
    let lines = list_lines(adapter, app.animation_tick());
    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    );
    frame.render_widget(list, body);

    frame.render_widget(StatusBar::new(adapter, app.popup_open()).widget(), footer);

    if controller.is_loading_visible() {
        render_loading_indicator(frame, body, app.animation_tick());
    }

    render_detail_dialog(frame, controller.presenter().state());
}

/// One line per visible item, plus the load-state footer row once the last
/// loaded item is on screen.
pub fn list_lines(adapter: &ListAdapter, animation_tick: u8) -> Vec<Line<'static>> {
    let selected = adapter.selected_index();
    let window = adapter.visible_window();
    let reached_end = window
        .last()
        .map_or(true, |(index, _)| index + 1 >= adapter.item_count());

    let mut lines: Vec<Line<'static>> = window
        .into_iter()
        .map(|(index, item)| {
            let mut line = Line::from(vec![
                Span::styled(format!(" #{:03}  ", item.id), Style::default().fg(MUTED_TEXT)),
                Span::styled(item.display_name(), Style::default().fg(HEADER_TEXT)),
            ]);
            if index == selected {
                line = line.style(
                    Style::default()
                        .bg(ACTIVE_HIGHLIGHT)
                        .add_modifier(Modifier::BOLD),
                );
            }
            line
        })
        .collect();

    if reached_end && lines.len() < adapter.viewport_rows() {
        match adapter.footer() {
            FooterState::Hidden => {}
            FooterState::Loading => lines.push(Line::from(Span::styled(
                format!(" {} Loading more...", spinner(animation_tick)),
                Style::default().fg(STATUS_OK),
            ))),
            FooterState::Error(reason) => lines.push(Line::from(vec![
                Span::styled(format!(" Failed: {reason}"), Style::default().fg(STATUS_ERROR)),
                Span::styled("  (r: Retry)", Style::default().fg(MUTED_TEXT)),
            ])),
            FooterState::EndOfList => lines.push(Line::from(Span::styled(
                " End of list",
                Style::default().fg(MUTED_TEXT),
            ))),
        }
    }

    lines
}

fn render_loading_indicator(frame: &mut Frame<'_>, body: Rect, animation_tick: u8) {
    let area = centered_rect_by_size(body, 28, 3);
    frame.render_widget(Clear, area);
    let line = Line::from(vec![
        Span::styled(format!(" {} ", spinner(animation_tick)), Style::default().fg(STATUS_OK)),
        Span::styled("Loading catalog...", Style::default().fg(HEADER_TEXT)),
    ]);
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(POPUP_BORDER)),
    );
    frame.render_widget(widget, area);
}
