//! Main panel rendering
//!
//! The body holds two collapsible panels, each gated by a feature flag:
//! - Token information (balance, usage, expiry)
//! - Call details (log table)

use super::components::render_loading_spinner;
use super::styling::HINT;
use super::table::render_call_details;
use crate::config::FeatureFlags;
use crate::display::QUOTA_PER_UNIT;
use crate::state::AppState;
use crate::summary::summary_lines;
use crate::types::Panel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows used by the token information panel when open (4 lines + borders)
const TOKEN_INFO_HEIGHT: u16 = 6;

/// Render the enabled panels into the body area
pub fn render_body(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    features: &FeatureFlags,
    spinner_index: usize,
) {
    let mut constraints = Vec::new();
    if features.show_balance {
        constraints.push(if state.panels.is_expanded(Panel::TokenInfo) {
            Constraint::Length(TOKEN_INFO_HEIGHT)
        } else {
            Constraint::Length(1)
        });
    }
    if features.show_detail {
        constraints.push(if state.panels.is_expanded(Panel::CallDetails) {
            Constraint::Min(0)
        } else {
            Constraint::Length(1)
        });
    }
    // Soak up leftover space when the table is not taking it
    if !(features.show_detail && state.panels.is_expanded(Panel::CallDetails)) {
        constraints.push(Constraint::Min(0));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next = 0;
    if features.show_balance {
        render_token_info_panel(frame, chunks[next], state, spinner_index);
        next += 1;
    }
    if features.show_detail {
        render_call_details_panel(frame, chunks[next], state, features, spinner_index);
    }
}

/// One-line header shown for a collapsed panel
fn render_collapsed(frame: &mut Frame, area: Rect, title: &str, key: char) {
    let line = Line::from(vec![
        Span::styled("▸ ", Style::default().fg(Color::Cyan)),
        Span::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  ({key}: expand)"), Style::default().fg(HINT)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_token_info_panel(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    if !state.panels.is_expanded(Panel::TokenInfo) {
        render_collapsed(frame, area, "Token Information", 'b');
        return;
    }

    let result = state.active_result();

    let title = if result.token_valid {
        " ▾ Token Information (b: collapse, c: copy) "
    } else {
        " ▾ Token Information (b: collapse) "
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.loading {
        render_loading_spinner(frame, inner, spinner_index);
        return;
    }

    let lines: Vec<Line> = summary_lines(result)
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(HINT)),
                Span::raw(value),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_call_details_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    features: &FeatureFlags,
    spinner_index: usize,
) {
    if !state.panels.is_expanded(Panel::CallDetails) {
        render_collapsed(frame, area, "Call Details", 'd');
        return;
    }

    let logs = &state.active_result().logs;

    let mut title = vec![Span::raw(" ▾ Call Details (d: collapse")];
    if !logs.is_empty() {
        title.push(Span::raw(", e: export CSV"));
    }
    title.push(Span::raw(") "));
    if features.show_exchange_rate {
        title.push(Span::styled(
            format!(" Calculated exchange rate: $1 = {QUOTA_PER_UNIT} quota "),
            Style::default().fg(Color::Black).bg(Color::Green),
        ));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.loading {
        render_loading_spinner(frame, inner, spinner_index);
        return;
    }

    if logs.is_empty() {
        let empty = Paragraph::new("No call records\n\nEnter a token and press [Enter] to query")
            .style(Style::default().fg(HINT));
        frame.render_widget(empty, inner);
        return;
    }

    render_call_details(frame, inner, state, logs);
}
