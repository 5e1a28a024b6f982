use crate::state::AppState;
use crate::types::{Dialog, InputMode, Notice, Panel};

/// Represents all possible state-changing actions in the application
/// This pattern separates input handling from state mutations, making the code
/// more testable
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Endpoint tabs
    SelectEndpoint(usize),
    NextEndpoint,
    PreviousEndpoint,

    // Panels
    TogglePanel(Panel),

    // Table navigation
    SelectNextRow,
    SelectPreviousRow,
    NextPage,
    PreviousPage,
    CyclePageSize,
    MoveHeaderLeft,
    MoveHeaderRight,
    SortByHeader,

    // Token input
    EnterTokenInputMode,
    ExitTokenInputMode,
    AppendToTokenInput(String),
    BackspaceTokenInput,
    DeleteWordTokenInput,
    ClearTokenInput,

    // Quick jump
    EnterJumpMode,
    ExitJumpMode,
    AppendToJumpInput(String),
    BackspaceJumpInput,
    ConfirmJump,

    // Feedback
    PushNotice(Notice),
    ClearNotices,
    ShowDialog(Dialog),
    DismissDialog,
}

/// Apply an action to the application state
/// All state mutations from key handling go through this function
pub fn apply_action(action: AppAction, state: &mut AppState) {
    let total = state.active_result().logs.len();

    match action {
        AppAction::SelectEndpoint(index) => {
            if index != state.selector.active_index() && state.selector.select_index(index) {
                state.table.rewind();
            }
        }
        AppAction::NextEndpoint => {
            state.selector.next();
            state.table.rewind();
        }
        AppAction::PreviousEndpoint => {
            state.selector.previous();
            state.table.rewind();
        }

        AppAction::TogglePanel(panel) => {
            state.panels.toggle(panel);
        }

        AppAction::SelectNextRow => state.table.select_next(total),
        AppAction::SelectPreviousRow => state.table.select_previous(),
        AppAction::NextPage => state.table.next_page(total),
        AppAction::PreviousPage => state.table.previous_page(),
        AppAction::CyclePageSize => state.table.cycle_page_size(),
        AppAction::MoveHeaderLeft => state.table.move_header_left(),
        AppAction::MoveHeaderRight => state.table.move_header_right(),
        AppAction::SortByHeader => {
            let column = state.table.header_column();
            state.table.toggle_sort(column);
        }

        AppAction::EnterTokenInputMode => {
            state.input.mode = InputMode::EnteringToken;
        }
        AppAction::ExitTokenInputMode => {
            state.input.mode = InputMode::Normal;
        }
        AppAction::AppendToTokenInput(text) => {
            // pasted text may carry line breaks or spaces from wrapping
            state
                .input
                .token_input
                .extend(text.chars().filter(|c| !c.is_whitespace()));
        }
        AppAction::BackspaceTokenInput => {
            state.input.token_input.pop();
        }
        AppAction::DeleteWordTokenInput => {
            delete_word(&mut state.input.token_input);
        }
        AppAction::ClearTokenInput => {
            state.input.token_input.clear();
        }

        AppAction::EnterJumpMode => {
            if state.table.shows_pager(total) {
                state.input.jump_input.clear();
                state.input.mode = InputMode::JumpToPage;
            }
        }
        AppAction::ExitJumpMode => {
            state.input.jump_input.clear();
            state.input.mode = InputMode::Normal;
        }
        AppAction::AppendToJumpInput(text) => {
            state
                .input
                .jump_input
                .extend(text.chars().filter(char::is_ascii_digit));
        }
        AppAction::BackspaceJumpInput => {
            state.input.jump_input.pop();
        }
        AppAction::ConfirmJump => {
            if let Ok(page) = state.input.jump_input.parse::<usize>() {
                state.table.jump_to(page, total);
            }
            state.input.jump_input.clear();
            state.input.mode = InputMode::Normal;
        }

        AppAction::PushNotice(notice) => state.push_notice(notice),
        AppAction::ClearNotices => state.notices.clear(),
        AppAction::ShowDialog(dialog) => state.dialog = Some(dialog),
        AppAction::DismissDialog => state.dialog = None,
    }
}

/// Remove the trailing word (and any trailing separators before it)
fn delete_word(buffer: &mut String) {
    let is_separator = |c: char| !c.is_alphanumeric();
    while buffer.ends_with(is_separator) {
        buffer.pop();
    }
    while buffer.chars().last().is_some_and(|c| !is_separator(c)) {
        buffer.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::QueryOutcome;
    use crate::state::test_support::state_with;
    use crate::table::SortColumn;
    use crate::types::{LogEntry, QueryResult};

    fn with_logs(count: usize) -> AppState {
        let mut state = state_with(&["main", "backup"]);
        state.finish_query(
            "main",
            QueryOutcome {
                result: QueryResult {
                    logs: (0..count)
                        .map(|i| LogEntry {
                            created_at: i as i64,
                            ..Default::default()
                        })
                        .collect(),
                    ..Default::default()
                },
                notices: vec![],
                expand_panels: true,
            },
        );
        state
    }

    #[test]
    fn test_token_input_editing() {
        let mut state = state_with(&["main"]);
        apply_action(AppAction::AppendToTokenInput("sk-abc def\n".to_string()), &mut state);
        assert_eq!(state.input.token_input, "sk-abcdef");

        apply_action(AppAction::BackspaceTokenInput, &mut state);
        assert_eq!(state.input.token_input, "sk-abcde");

        apply_action(AppAction::DeleteWordTokenInput, &mut state);
        assert_eq!(state.input.token_input, "sk-");

        apply_action(AppAction::ClearTokenInput, &mut state);
        assert!(state.input.token_input.is_empty());
    }

    #[test]
    fn test_delete_word_strips_trailing_separator() {
        let mut buffer = "sk-".to_string();
        delete_word(&mut buffer);
        assert_eq!(buffer, "");
    }

    #[test]
    fn test_endpoint_switch_rewinds_table_only() {
        let mut state = with_logs(30);
        apply_action(AppAction::NextPage, &mut state);
        assert_eq!(state.table.page, 1);

        apply_action(AppAction::NextEndpoint, &mut state);
        assert_eq!(state.selector.active().name, "backup");
        assert_eq!(state.table.page, 0);
        assert_eq!(state.results.get("main").unwrap().logs.len(), 30);

        apply_action(AppAction::SelectEndpoint(0), &mut state);
        assert_eq!(state.selector.active().name, "main");
        apply_action(AppAction::SelectEndpoint(5), &mut state);
        assert_eq!(state.selector.active().name, "main");
    }

    #[test]
    fn test_sort_by_header_cursor() {
        let mut state = with_logs(3);
        apply_action(AppAction::MoveHeaderRight, &mut state);
        apply_action(AppAction::MoveHeaderRight, &mut state);
        apply_action(AppAction::SortByHeader, &mut state);
        assert_eq!(state.table.sort.map(|(c, _)| c), Some(SortColumn::Model));
    }

    #[test]
    fn test_jump_mode_requires_pager() {
        let mut state = with_logs(5);
        apply_action(AppAction::EnterJumpMode, &mut state);
        assert_eq!(state.input.mode, InputMode::Normal);
    }

    #[test]
    fn test_jump_to_page() {
        let mut state = with_logs(45);
        apply_action(AppAction::EnterJumpMode, &mut state);
        assert_eq!(state.input.mode, InputMode::JumpToPage);

        apply_action(AppAction::AppendToJumpInput("4x".to_string()), &mut state);
        assert_eq!(state.input.jump_input, "4");
        apply_action(AppAction::ConfirmJump, &mut state);

        assert_eq!(state.table.page, 3);
        assert_eq!(state.input.mode, InputMode::Normal);
        assert!(state.input.jump_input.is_empty());
    }

    #[test]
    fn test_dialog_show_and_dismiss() {
        let mut state = state_with(&["main"]);
        apply_action(
            AppAction::ShowDialog(Dialog {
                title: "t".to_string(),
                body: "b".to_string(),
            }),
            &mut state,
        );
        assert!(state.dialog.is_some());
        apply_action(AppAction::DismissDialog, &mut state);
        assert!(state.dialog.is_none());
    }
}
