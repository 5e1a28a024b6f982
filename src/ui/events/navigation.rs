//! Navigation handlers
//!
//! This module maps navigation keys in normal mode to actions:
//! - Endpoint tabs (Tab/Shift+Tab, 1-9)
//! - Table rows and pages (j/k, h/l, arrows)
//! - Header cursor and sorting (</>, s)

use crate::actions::AppAction;
use crate::types::Panel;
use crossterm::event::KeyCode;

/// Translate a normal-mode navigation key into an action
pub fn navigation_action(code: KeyCode) -> Option<AppAction> {
    let action = match code {
        KeyCode::Tab => AppAction::NextEndpoint,
        KeyCode::BackTab => AppAction::PreviousEndpoint,
        KeyCode::Char(c @ '1'..='9') => {
            AppAction::SelectEndpoint(c.to_digit(10)? as usize - 1)
        }

        KeyCode::Char('b') => AppAction::TogglePanel(Panel::TokenInfo),
        KeyCode::Char('d') => AppAction::TogglePanel(Panel::CallDetails),

        KeyCode::Char('j') | KeyCode::Down => AppAction::SelectNextRow,
        KeyCode::Char('k') | KeyCode::Up => AppAction::SelectPreviousRow,
        KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => AppAction::NextPage,
        KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => AppAction::PreviousPage,
        KeyCode::Char('p') => AppAction::CyclePageSize,
        KeyCode::Char('g') => AppAction::EnterJumpMode,

        KeyCode::Char('<') => AppAction::MoveHeaderLeft,
        KeyCode::Char('>') => AppAction::MoveHeaderRight,
        KeyCode::Char('s') => AppAction::SortByHeader,

        _ => return None,
    };

    Some(action)
}
