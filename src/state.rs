use crate::endpoints::EndpointSelector;
use crate::request::QueryOutcome;
use crate::table::TableState;
use crate::types::{Dialog, InputMode, Notice, Panel, QueryResult};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a notice stays on screen
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

static EMPTY_RESULT: QueryResult = QueryResult::EMPTY;

/// Per-endpoint query results, keyed by endpoint name.
///
/// Results are only ever replaced whole, so readers never see a mix of two
/// queries.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    results: HashMap<String, QueryResult>,
}

impl ResultStore {
    pub fn get(&self, key: &str) -> Option<&QueryResult> {
        self.results.get(key)
    }

    /// The stored result, or the reset state when nothing was queried yet
    pub fn get_or_empty(&self, key: &str) -> &QueryResult {
        self.get(key).unwrap_or(&EMPTY_RESULT)
    }

    pub fn replace(&mut self, key: &str, result: QueryResult) {
        self.results.insert(key.to_string(), result);
    }
}

#[derive(Debug, Clone)]
pub struct InputState {
    pub mode: InputMode,
    pub token_input: String,
    pub jump_input: String,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            mode: InputMode::Normal,
            token_input: String::new(),
            jump_input: String::new(),
        }
    }
}

/// Open/closed state of the two collapsible panels
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    pub token_info_expanded: bool,
    pub call_details_expanded: bool,
}

impl PanelState {
    pub fn is_expanded(&self, panel: Panel) -> bool {
        match panel {
            Panel::TokenInfo => self.token_info_expanded,
            Panel::CallDetails => self.call_details_expanded,
        }
    }

    pub fn toggle(&mut self, panel: Panel) {
        match panel {
            Panel::TokenInfo => self.token_info_expanded = !self.token_info_expanded,
            Panel::CallDetails => self.call_details_expanded = !self.call_details_expanded,
        }
    }

    pub fn expand_all(&mut self) {
        self.token_info_expanded = true;
        self.call_details_expanded = true;
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub selector: EndpointSelector,
    pub results: ResultStore,
    pub table: TableState,
    pub input: InputState,
    pub panels: PanelState,
    /// A query is in flight; further triggers are ignored
    pub loading: bool,
    pub notices: Vec<Notice>,
    pub dialog: Option<Dialog>,
}

impl AppState {
    pub fn new(selector: EndpointSelector) -> Self {
        Self {
            selector,
            results: ResultStore::default(),
            table: TableState::default(),
            input: InputState::default(),
            panels: PanelState::default(),
            loading: false,
            notices: Vec::new(),
            dialog: None,
        }
    }

    pub fn active_result(&self) -> &QueryResult {
        self.results.get_or_empty(&self.selector.active().name)
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Drop notices older than `NOTICE_TTL`
    pub fn expire_notices(&mut self, now: Instant) {
        self.notices
            .retain(|n| now.saturating_duration_since(n.created) < NOTICE_TTL);
    }

    /// Store a finished query for `endpoint_key` and clear the loading flag
    pub fn finish_query(&mut self, endpoint_key: &str, outcome: QueryOutcome) {
        self.results.replace(endpoint_key, outcome.result);
        self.notices.extend(outcome.notices);
        if outcome.expand_panels {
            self.panels.expand_all();
        }
        if self.selector.active().name == endpoint_key {
            self.table.rewind();
        }
        self.loading = false;
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::state_with;
    use super::*;
    use crate::types::LogEntry;

    fn outcome(balance: f64) -> QueryOutcome {
        QueryOutcome {
            result: QueryResult {
                balance,
                token_valid: true,
                logs: vec![LogEntry::default()],
                ..Default::default()
            },
            notices: vec![Notice::success("ok")],
            expand_panels: true,
        }
    }

    #[test]
    fn test_unqueried_endpoint_reads_as_empty() {
        let state = state_with(&["main"]);
        assert_eq!(state.active_result(), &QueryResult::default());
        assert!(state.results.get("main").is_none());
    }

    #[test]
    fn test_finish_query_replaces_whole_result() {
        let mut state = state_with(&["main"]);
        state.loading = true;
        state.finish_query("main", outcome(5.0));

        let mut second = outcome(1.0);
        second.result.logs.clear();
        second.expand_panels = false;
        state.finish_query("main", second);

        let result = state.active_result();
        assert_eq!(result.balance, 1.0);
        assert!(result.logs.is_empty());
        assert!(!state.loading);
        assert!(state.panels.token_info_expanded);
        assert_eq!(state.notices.len(), 2);
    }

    #[test]
    fn test_switching_endpoint_keeps_other_results() {
        let mut state = state_with(&["main", "backup"]);
        state.finish_query("main", outcome(5.0));

        state.selector.select_endpoint("backup");
        assert_eq!(state.active_result(), &QueryResult::default());

        state.finish_query("backup", outcome(9.0));
        state.selector.select_endpoint("main");
        assert_eq!(state.active_result().balance, 5.0);
        assert_eq!(state.results.get("backup").unwrap().balance, 9.0);
    }

    #[test]
    fn test_expire_notices() {
        let mut state = state_with(&["main"]);
        state.push_notice(Notice::warning("old"));
        let later = state.notices[0].created + NOTICE_TTL;
        state.push_notice(Notice::error("new"));
        state.notices[1].created = later;

        state.expire_notices(later);
        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices[0].message, "new");
    }

    #[test]
    fn test_panel_toggle() {
        let mut panels = PanelState::default();
        panels.toggle(Panel::CallDetails);
        assert!(panels.is_expanded(Panel::CallDetails));
        assert!(!panels.is_expanded(Panel::TokenInfo));
    }
}
