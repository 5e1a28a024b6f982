//! Yank (copy) handlers
//!
//! This module handles copying content to the system clipboard:
//! the token information summary and cells of the selected log row.
//! When the clipboard is unavailable the text is shown in a dialog instead.

use super::helpers::apply;
use crate::actions::AppAction;
use crate::error::ClipboardError;
use crate::state::AppState;
use crate::summary::summary_text;
use crate::types::{Dialog, LogEntry, Notice};
use arboard::Clipboard;
use std::sync::{Arc, RwLock};

const MANUAL_COPY_TITLE: &str = "Unable to copy to clipboard, please copy manually";

/// Which cell of the selected row to copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    TokenName,
    ModelName,
}

/// Copy `text` to the clipboard, falling back to a manual-copy dialog
pub fn copy_text(state: &Arc<RwLock<AppState>>, text: String) {
    let action = match set_clipboard(&text) {
        Ok(()) => {
            tracing::debug!(chars = text.chars().count(), "copied to clipboard");
            AppAction::PushNotice(Notice::success(format!("Copied: {text}")))
        }
        Err(e) => {
            tracing::warn!(error = %e, "clipboard unavailable");
            AppAction::ShowDialog(Dialog {
                title: MANUAL_COPY_TITLE.to_string(),
                body: text,
            })
        }
    };

    apply(state, action);
}

fn set_clipboard(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Copy the token information block; only available for a valid token
pub fn handle_copy_summary(state: &Arc<RwLock<AppState>>) {
    let text = match state.read() {
        Ok(s) if s.active_result().token_valid => summary_text(s.active_result()),
        _ => return,
    };

    copy_text(state, text);
}

/// Copy a cell of the selected row. Only consumption rows show these cells.
pub fn handle_copy_row_field(state: &Arc<RwLock<AppState>>, field: RowField) {
    let text = match state.read() {
        Ok(s) => s
            .table
            .selected_entry(&s.active_result().logs)
            .and_then(|entry| row_field(entry, field)),
        Err(_) => return,
    };

    if let Some(text) = text {
        copy_text(state, text);
    }
}

fn row_field(entry: &LogEntry, field: RowField) -> Option<String> {
    let visible = entry.classify().visible_cells(entry);

    let value = match field {
        RowField::TokenName if visible.token_name => &entry.token_name,
        RowField::ModelName if visible.model => &entry.model_name,
        _ => return None,
    };

    Some(value.clone())
}
