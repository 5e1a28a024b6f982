//! Modal dialog rendering
//!
//! This module contains rendering functions for overlays:
//! - Notices (short-lived toasts in the top right corner)
//! - Manual copy dialog (when the clipboard is unavailable)
//! - Page jump prompt

use super::styling::{notice_color, HINT, MODAL_BG};
use crate::state::AppState;
use crate::types::{Dialog, Notice};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Center a `width` x `height` box inside `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Stack notices in the top right corner, newest at the bottom
pub fn render_notices(frame: &mut Frame, notices: &[Notice]) {
    let area = frame.area();
    let width = (area.width / 3).clamp(20, 60).min(area.width);

    for (i, notice) in notices.iter().enumerate() {
        let y = 1 + i as u16 * 3;
        if y + 3 > area.height {
            break;
        }

        let notice_area = Rect {
            x: area.width.saturating_sub(width + 1),
            y,
            width,
            height: 3,
        };

        let color = notice_color(notice.level);

        frame.render_widget(Clear, notice_area);
        let toast = Paragraph::new(notice.message.clone())
            .style(Style::default().fg(color).bg(MODAL_BG))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(toast, notice_area);
    }
}

/// Render a dialog holding text the user should copy by hand
pub fn render_dialog(frame: &mut Frame, dialog: &Dialog) {
    let area = frame.area();

    let modal_width = (area.width as f32 * 0.6).min(80.0) as u16;
    let body_lines = dialog.body.lines().count() as u16;
    let modal_area = centered(area, modal_width, body_lines + 5);

    // Clear the background behind the modal
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(format!(" {} ", dialog.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(MODAL_BG).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let body = Paragraph::new(dialog.body.clone()).wrap(Wrap { trim: false });
    frame.render_widget(body, chunks[0]);

    let help = Paragraph::new("Esc/Enter: Close")
        .style(Style::default().fg(HINT))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[1]);
}

/// Render the quick jump prompt
pub fn render_jump_modal(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let total = state.active_result().logs.len();
    let modal_area = centered(area, 40, 6);

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Jump to Page ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(MODAL_BG).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let label = Paragraph::new(format!("Page (1-{}):", state.table.page_count(total)))
        .style(Style::default().fg(Color::LightCyan));
    frame.render_widget(label, chunks[0]);

    let input = Paragraph::new(format!("{}_", state.input.jump_input)).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(input, chunks[1]);

    let help = Paragraph::new("Enter: Jump  |  Esc: Cancel")
        .style(Style::default().fg(HINT))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}
