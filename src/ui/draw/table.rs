//! Call log table rendering
//!
//! Renders the sorted, paginated log table with its pager line and a detail
//! pane for the selected row's content and price breakdown.

use super::styling::{elapsed_color, model_color, stream_color, HINT};
use crate::display::{
    content_detail, preview_lines, render_is_stream, render_quota, render_timestamp,
    render_use_time, ContentDetail, Elapsed, PRICE_UNSUPPORTED, QUOTA_DIGITS,
};
use crate::state::AppState;
use crate::table::{SortColumn, SortDirection};
use crate::types::LogEntry;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState as WidgetTableState, Wrap},
    Frame,
};

/// Fixed widths for the seven sortable columns, content takes the rest
const COLUMN_WIDTHS: [u16; 7] = [19, 12, 18, 18, 8, 10, 11];

/// Table rows show at most this many lines of content
const PREVIEW_ROWS: usize = 2;

const DETAIL_HEIGHT: u16 = 6;

/// Render table, pager and detail pane for the active endpoint's logs
pub fn render_call_details(frame: &mut Frame, area: Rect, state: &AppState, logs: &[LogEntry]) {
    let pager_height = if state.table.shows_pager(logs.len()) { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(pager_height),
            Constraint::Length(DETAIL_HEIGHT),
        ])
        .split(area);

    render_log_table(frame, chunks[0], state, logs);

    if pager_height > 0 {
        render_pager(frame, chunks[1], state, logs.len());
    }

    render_detail_pane(frame, chunks[2], state.table.selected_entry(logs));
}

fn header_row(state: &AppState) -> Row<'static> {
    let cursor = state.table.header_column();

    let mut cells: Vec<Cell> = SortColumn::ALL
        .iter()
        .map(|&column| {
            let arrow = match state.table.sort {
                Some((sorted, SortDirection::Ascending)) if sorted == column => " ▲",
                Some((sorted, SortDirection::Descending)) if sorted == column => " ▼",
                _ => "",
            };

            let mut style = Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD);
            if column == cursor {
                style = style.add_modifier(Modifier::UNDERLINED);
            }

            Cell::from(format!("{}{arrow}", column.title())).style(style)
        })
        .collect();

    cells.push(
        Cell::from("Content").style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    );

    Row::new(cells)
}

fn log_row(entry: &LogEntry, content_width: usize) -> Row<'static> {
    let visible = entry.classify().visible_cells(entry);

    let token_name = if visible.token_name {
        Cell::from(entry.token_name.clone()).style(Style::default().fg(Color::Gray))
    } else {
        Cell::from("")
    };

    let model = if visible.model {
        Cell::from(entry.model_name.clone()).style(
            Style::default()
                .fg(model_color(&entry.model_name))
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Cell::from("")
    };

    let time = if visible.time {
        Cell::from(Line::from(vec![
            Span::styled(
                render_use_time(entry.use_time),
                Style::default().fg(elapsed_color(Elapsed::from_seconds(entry.use_time))),
            ),
            Span::raw(" "),
            Span::styled(
                render_is_stream(entry.is_stream),
                Style::default().fg(stream_color(entry.is_stream)),
            ),
        ]))
    } else {
        Cell::from("")
    };

    let prompt = if visible.prompt_tokens {
        Cell::from(entry.prompt_tokens.to_string())
    } else {
        Cell::from("")
    };

    let completion = if visible.completion_tokens {
        Cell::from(entry.completion_tokens.to_string())
    } else {
        Cell::from("")
    };

    let quota = if visible.quota {
        Cell::from(render_quota(entry.quota, QUOTA_DIGITS))
    } else {
        Cell::from("")
    };

    let preview: Vec<Line> = preview_lines(&entry.content, content_width, PREVIEW_ROWS)
        .into_iter()
        .map(Line::from)
        .collect();

    Row::new(vec![
        Cell::from(render_timestamp(entry.created_at)),
        token_name,
        model,
        time,
        prompt,
        completion,
        quota,
        Cell::from(Text::from(preview)),
    ])
    .height(PREVIEW_ROWS as u16)
}

fn render_log_table(frame: &mut Frame, area: Rect, state: &AppState, logs: &[LogEntry]) {
    let fixed: u16 = COLUMN_WIDTHS.iter().sum();
    let spacing = COLUMN_WIDTHS.len() as u16;
    let content_width = area.width.saturating_sub(fixed + spacing).max(10);

    let order = state.table.sorted_indices(logs);
    let range = state.table.page_range(logs.len());

    let rows: Vec<Row> = order[range]
        .iter()
        .map(|&i| log_row(&logs[i], content_width as usize))
        .collect();

    let mut widths: Vec<Constraint> = COLUMN_WIDTHS.iter().map(|&w| Constraint::Length(w)).collect();
    widths.push(Constraint::Min(10));

    let table = Table::new(rows, widths)
        .header(header_row(state).bottom_margin(1))
        .row_highlight_style(Style::default().bg(Color::Rgb(50, 50, 70)));

    let mut widget_state = WidgetTableState::default().with_selected(Some(state.table.selected));
    frame.render_stateful_widget(table, area, &mut widget_state);
}

fn render_pager(frame: &mut Frame, area: Rect, state: &AppState, total: usize) {
    let table = &state.table;
    let text = format!(
        "Page {}/{}  |  Total {total} items  |  {}/page  |  h/l: page  p: size  g: jump",
        table.page_range(total).start / table.page_size + 1,
        table.page_count(total),
        table.page_size,
    );

    frame.render_widget(Paragraph::new(text).style(Style::default().fg(HINT)), area);
}

/// Full content of the selected row plus how its cost was computed
fn render_detail_pane(frame: &mut Frame, area: Rect, entry: Option<&LogEntry>) {
    let block = Block::default()
        .title(" Content ")
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(entry) = entry else {
        frame.render_widget(block, area);
        return;
    };

    let mut lines = vec![Line::from(entry.content.clone())];

    match content_detail(entry) {
        ContentDetail::Unsupported => {
            lines.push(Line::from(Span::styled(
                PRICE_UNSUPPORTED,
                Style::default().fg(HINT),
            )));
        }
        ContentDetail::Plain => {}
        ContentDetail::Breakdown(breakdown) => {
            lines.extend(
                breakdown
                    .into_iter()
                    .map(|line| Line::from(Span::styled(line, Style::default().fg(Color::Green)))),
            );
        }
    }

    let detail = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(detail, area);
}
