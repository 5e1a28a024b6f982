//! Event handling system for token-usage-tui
//!
//! This module processes user input and translates it into state-changing actions.
//! It handles multiple input modes:
//! - Normal: Endpoint tabs, table navigation, copy and export commands
//! - EnteringToken: Editing the API token
//! - JumpToPage: Typing a page number for the call log table
//!
//! An open dialog takes every key until it is dismissed.
//!
//! # Architecture
//!
//! The EventHandler uses an action pattern where input events generate AppActions
//! that are applied to AppState via the apply_action function in actions.rs.
//! Queries and exports read what they need under a short lock and then release it.

mod execution;
mod helpers;
mod modals;
mod navigation;
mod yank;

pub use helpers::apply;

use crate::actions::AppAction;
use crate::config::Settings;
use crate::state::AppState;
use crate::types::InputMode;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use yank::RowField;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Event handler for managing user input and state updates
#[derive(Debug)]
pub struct EventHandler {
    pub should_quit: bool,
    settings: Arc<Settings>,
}

impl EventHandler {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            should_quit: false,
            settings,
        }
    }

    /// Main event handling loop - dispatches to appropriate handlers based on input mode
    pub fn handle_events(&mut self, state: Arc<RwLock<AppState>>) -> Result<()> {
        if !event::poll(POLL_INTERVAL)? {
            return Ok(());
        }

        let Event::Key(key) = event::read()? else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let (dialog_open, input_mode) = {
            let s = state.read().map_err(|_| eyre!("app state lock poisoned"))?;
            (s.dialog.is_some(), s.input.mode)
        };

        if dialog_open {
            modals::handle_dialog_input(key, &state);
            return Ok(());
        }

        match input_mode {
            InputMode::EnteringToken => {
                modals::handle_token_input(key, &state, &self.settings);
            }
            InputMode::JumpToPage => {
                modals::handle_jump_input(key, &state);
            }
            InputMode::Normal => self.handle_normal_key(key, &state),
        }

        Ok(())
    }

    fn handle_normal_key(&mut self, key: KeyEvent, state: &Arc<RwLock<AppState>>) {
        if let Some(action) = navigation::navigation_action(key.code) {
            apply(state, action);
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('t') => {
                apply(state, AppAction::EnterTokenInputMode);
            }
            KeyCode::Enter => {
                execution::handle_query(state, &self.settings);
            }
            KeyCode::Char('c') => yank::handle_copy_summary(state),
            KeyCode::Char('y') => yank::handle_copy_row_field(state, RowField::TokenName),
            KeyCode::Char('m') => yank::handle_copy_row_field(state, RowField::ModelName),
            KeyCode::Char('e') => execution::handle_export(state, &self.settings),
            KeyCode::Esc => {
                apply(state, AppAction::ClearNotices);
            }
            _ => {}
        }
    }
}
