//! Reusable UI components
//!
//! This module contains shared UI components used throughout the application:
//! - Header (title, active endpoint, query status)
//! - Endpoint tabs
//! - Token input line
//! - Footer (command help)
//! - Loading spinner

use super::styling::{HINT, SPINNER};
use crate::state::AppState;
use crate::types::InputMode;
use crate::utils::mask_token;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

const TOKEN_PLACEHOLDER: &str =
    "Please enter the token to be queried sk-xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx";

/// Render the application header with the active endpoint and query status
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    let endpoint = state.selector.active();

    let status_text = if state.loading {
        format!("{} Querying...", SPINNER[spinner_index % SPINNER.len()])
    } else if state.active_result().token_valid {
        "Token valid".to_string()
    } else {
        "Idle".to_string()
    };

    let header_text = format!(
        "token usage tui - {} ({}) [{status_text}]",
        endpoint.name, endpoint.base_url
    );

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Render one tab per configured endpoint
pub fn render_endpoint_tabs(frame: &mut Frame, area: Rect, state: &AppState) {
    let titles: Vec<Line> = state
        .selector
        .endpoints()
        .iter()
        .enumerate()
        .map(|(i, endpoint)| Line::from(format!(" {} {} ", i + 1, endpoint.name)))
        .collect();

    let tabs = Tabs::new(titles)
        .select(state.selector.active_index())
        .style(Style::default().fg(HINT))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the token field; the full token is only visible while editing
pub fn render_token_input(frame: &mut Frame, area: Rect, state: &AppState) {
    let editing = state.input.mode == InputMode::EnteringToken;
    let token = &state.input.token_input;

    let border_style = if editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = if editing {
        Line::from(vec![
            Span::styled(token.clone(), Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ])
    } else if token.is_empty() {
        Line::from(Span::styled(TOKEN_PLACEHOLDER, Style::default().fg(HINT)))
    } else {
        Line::from(mask_token(token))
    };

    let title = if editing {
        " Token (Enter: query, Esc: done) "
    } else {
        " Token (t: edit, Enter: query) "
    };

    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );

    frame.render_widget(input, area);
}

/// Render the footer with command help
pub fn render_footer(frame: &mut Frame, area: Rect, mode: &InputMode) {
    let footer_text = match mode {
        InputMode::EnteringToken => "Type/paste token | Enter:Query Ctrl+W:Del word Ctrl+L:Clear Esc:Done",
        InputMode::JumpToPage => "Type page number | Enter:Jump Esc:Cancel",
        InputMode::Normal => {
            "t:Token Enter:Query Tab:Endpoint b/d:Panels j/k:Row h/l:Page p:Size g:Jump </>:Column s:Sort c:Copy y/m:Copy cell e:Export q:Quit"
        }
    };

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Commands"));

    frame.render_widget(footer, area);
}

/// Render loading spinner animation in place of a panel's content
pub fn render_loading_spinner(frame: &mut Frame, area: Rect, spinner_index: usize) {
    let loading_text = format!(
        "{} Querying\n\nPlease wait...",
        SPINNER[spinner_index % SPINNER.len()]
    );

    let loading = Paragraph::new(loading_text).style(Style::default().fg(Color::Yellow));

    frame.render_widget(loading, area);
}
