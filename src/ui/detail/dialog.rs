//! Rendering for the detail popup.

use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::catalog::{CatalogItem, ItemDetail};
use crate::ui::layout::centered_rect_by_size;
use crate::ui::theme::{spinner, ACCENT, HEADER_TEXT, MUTED_TEXT, POPUP_BORDER, STATUS_ERROR, STATUS_OK};

use super::state::DetailDialogState;

const DIALOG_WIDTH: u16 = 56;

/// Width of the bar drawn for a base stat of 255.
const STAT_BAR_WIDTH: u32 = 20;

pub fn render_detail_dialog(frame: &mut Frame, state: &DetailDialogState) {
    let Some(item) = state.item() else {
        return;
    };

    let lines = match state {
        DetailDialogState::Hidden => return,
        DetailDialogState::Loading { animation_tick, .. } => vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("  {} ", spinner(*animation_tick)), Style::default().fg(STATUS_OK)),
                Span::styled("Loading details...", Style::default().fg(HEADER_TEXT)),
            ]),
        ],
        DetailDialogState::Ready { detail, .. } => detail_lines(detail),
        DetailDialogState::Failed { error, .. } => vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Error: ", Style::default().fg(STATUS_ERROR)),
                Span::styled(error.clone(), Style::default().fg(HEADER_TEXT)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  r: Retry  Esc: Close",
                Style::default().fg(MUTED_TEXT),
            )),
        ],
    };

    let height = (lines.len() as u16).saturating_add(2);
    let area = centered_rect_by_size(frame.area(), DIALOG_WIDTH, height);

    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(Span::styled(title(item), Style::default().fg(ACCENT)))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn title(item: &CatalogItem) -> String {
    format!(" #{:03} {} ", item.id, item.display_name())
}

fn detail_lines(detail: &ItemDetail) -> Vec<Line<'static>> {
    let label = Style::default().fg(MUTED_TEXT);
    let value = Style::default().fg(HEADER_TEXT);

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Types:      ", label),
            Span::styled(detail.types.join(", "), value.add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("  Height:     ", label),
            Span::styled(format!("{:.1} m", detail.height as f32 / 10.0), value),
        ]),
        Line::from(vec![
            Span::styled("  Weight:     ", label),
            Span::styled(format!("{:.1} kg", detail.weight as f32 / 10.0), value),
        ]),
    ];

    if let Some(experience) = detail.base_experience {
        lines.push(Line::from(vec![
            Span::styled("  Base exp:   ", label),
            Span::styled(experience.to_string(), value),
        ]));
    }
    if !detail.abilities.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("  Abilities:  ", label),
            Span::styled(detail.abilities.join(", "), value),
        ]));
    }
    if let Some(sprite) = &detail.sprite_url {
        lines.push(Line::from(vec![
            Span::styled("  Sprite:     ", label),
            Span::styled(sprite.clone(), Style::default().fg(MUTED_TEXT)),
        ]));
    }
    if !detail.stats.is_empty() {
        lines.push(Line::from(""));
        for stat in &detail.stats {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<16}", stat.name), label),
                Span::styled(format!("{:>3} ", stat.value), value),
                Span::styled(stat_bar(stat.value), Style::default().fg(STATUS_OK)),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Esc: Close", label)));
    lines
}

fn stat_bar(value: u32) -> String {
    let filled = (value.min(255) * STAT_BAR_WIDTH).div_ceil(255);
    "█".repeat(filled as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Stat;

    #[test]
    fn stat_bar_scales_to_width() {
        assert_eq!(stat_bar(0), "");
        assert_eq!(stat_bar(255).chars().count(), 20);
        assert_eq!(stat_bar(400).chars().count(), 20);
        assert_eq!(stat_bar(1).chars().count(), 1);
    }

    #[test]
    fn title_pads_id() {
        let item = CatalogItem {
            id: 7,
            name: "squirtle".into(),
            thumbnail_url: String::new(),
        };
        assert_eq!(title(&item), " #007 Squirtle ");
    }

    #[test]
    fn detail_lines_include_stats() {
        let detail = ItemDetail {
            id: 1,
            name: "bulbasaur".into(),
            height: 7,
            weight: 69,
            base_experience: None,
            types: vec!["grass".into(), "poison".into()],
            abilities: vec![],
            stats: vec![Stat {
                name: "hp".into(),
                value: 45,
            }],
            sprite_url: None,
        };
        let lines = detail_lines(&detail);
        let text: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
        assert!(text.iter().any(|l| l.contains("grass, poison")));
        assert!(text.iter().any(|l| l.contains("0.7 m")));
        assert!(text.iter().any(|l| l.contains("hp")));
        assert!(!text.iter().any(|l| l.contains("Base exp")));
        assert!(!text.iter().any(|l| l.contains("Sprite")));
    }

    #[test]
    fn detail_lines_show_sprite_url_when_known() {
        let detail = ItemDetail {
            id: 25,
            name: "pikachu".into(),
            height: 4,
            weight: 60,
            base_experience: Some(112),
            types: vec!["electric".into()],
            abilities: vec!["static".into()],
            stats: vec![],
            sprite_url: Some("https://img/25.png".into()),
        };
        let text: Vec<String> = detail_lines(&detail).iter().map(|l| l.to_string()).collect();
        assert!(text.iter().any(|l| l.contains("https://img/25.png")));
        assert!(text.iter().any(|l| l.contains("Base exp")));
    }
}
