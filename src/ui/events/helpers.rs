//! Helper functions for event handling
//!
//! This module contains utility functions used across event handlers:
//! - Applying actions under the state lock
//! - Paste batching for the token field

use crate::actions::{apply_action, AppAction};
use crate::state::AppState;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Apply a single action to state
pub fn apply(state: &Arc<RwLock<AppState>>, action: AppAction) {
    if let Ok(mut s) = state.write() {
        apply_action(action, &mut s);
    }
}

/// Apply multiple actions to state under one lock
pub fn apply_many(state: &Arc<RwLock<AppState>>, actions: Vec<AppAction>) {
    if let Ok(mut s) = state.write() {
        for action in actions {
            apply_action(action, &mut s);
        }
    }
}

/// Gather the character events already queued behind `first`.
///
/// Terminals deliver a paste as a burst of key events.
pub fn collect_paste_batch(first: char) -> String {
    let mut batch = String::from(first);

    while matches!(event::poll(Duration::ZERO), Ok(true)) {
        match event::read() {
            Ok(Event::Key(key)) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let KeyCode::Char(c) = key.code else { break };
                batch.push(c);
            }
            _ => break,
        }
    }

    batch
}
