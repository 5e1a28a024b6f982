//! Modal input handlers
//!
//! This module handles keys while a text field or dialog has focus:
//! - Token input
//! - Page jump prompt
//! - Manual copy dialog

use super::execution::handle_query;
use super::helpers::{apply, apply_many, collect_paste_batch};
use crate::actions::AppAction;
use crate::config::Settings;
use crate::state::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, RwLock};

/// Handle token input (with paste batching support)
pub fn handle_token_input(key: KeyEvent, state: &Arc<RwLock<AppState>>, settings: &Settings) {
    match key.code {
        KeyCode::Enter => {
            apply(state, AppAction::ExitTokenInputMode);
            handle_query(state, settings);
        }
        KeyCode::Esc => {
            apply(state, AppAction::ExitTokenInputMode);
        }
        KeyCode::Backspace => {
            apply(state, AppAction::BackspaceTokenInput);
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::ClearTokenInput);
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::DeleteWordTokenInput);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let batch = collect_paste_batch(c);
            apply(state, AppAction::AppendToTokenInput(batch));
        }
        _ => {}
    }
}

/// Handle the page jump prompt
pub fn handle_jump_input(key: KeyEvent, state: &Arc<RwLock<AppState>>) {
    match key.code {
        KeyCode::Enter => apply(state, AppAction::ConfirmJump),
        KeyCode::Esc => apply(state, AppAction::ExitJumpMode),
        KeyCode::Backspace => apply(state, AppAction::BackspaceJumpInput),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            apply(state, AppAction::AppendToJumpInput(c.to_string()));
        }
        _ => {}
    }
}

/// Any closing key dismisses the dialog; it also clears stale notices
pub fn handle_dialog_input(key: KeyEvent, state: &Arc<RwLock<AppState>>) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
        apply_many(state, vec![AppAction::DismissDialog, AppAction::ClearNotices]);
    }
}
