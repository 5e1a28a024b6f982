//! Query and export handlers
//!
//! This module handles:
//! - Validating the token and starting a background query (Enter key)
//! - Exporting the active endpoint's call log to CSV

use super::helpers::apply;
use crate::actions::AppAction;
use crate::config::Settings;
use crate::export::export_csv;
use crate::request::execute_query_background;
use crate::state::AppState;
use crate::token;
use crate::types::Notice;
use std::sync::{Arc, RwLock};
use tokio::task::JoinHandle;

/// Validate the token and start a query against the active endpoint.
///
/// Returns the task handle when a query was started. Nothing is sent when
/// the token is malformed or a query is already running.
pub fn handle_query(state: &Arc<RwLock<AppState>>, settings: &Settings) -> Option<JoinHandle<()>> {
    let (token, endpoint) = {
        let s = state.read().ok()?;
        if s.loading {
            tracing::debug!("query already in progress");
            return None;
        }
        (s.input.token_input.clone(), s.selector.active().clone())
    };

    if let Err(e) = token::validate(&token) {
        tracing::debug!(error = %e, "token rejected before query");
        apply(state, AppAction::PushNotice(e.to_notice()));
        return None;
    }

    Some(execute_query_background(
        Arc::clone(state),
        endpoint,
        token,
        settings.features,
        settings.timeout,
    ))
}

/// Write the active endpoint's logs to `data.csv` in the export directory
pub fn handle_export(state: &Arc<RwLock<AppState>>, settings: &Settings) {
    let logs = match state.read() {
        Ok(s) => s.active_result().logs.clone(),
        Err(_) => return,
    };

    if logs.is_empty() {
        apply(state, AppAction::PushNotice(Notice::warning("No call records to export")));
        return;
    }

    let notice = match export_csv(&logs, &settings.export_dir) {
        Ok(path) => Notice::success(format!("Exported to {}", path.display())),
        Err(e) => {
            tracing::error!(error = %e, "csv export failed");
            Notice::error(format!("Export failed: {e}"))
        }
    };
    apply(state, AppAction::PushNotice(notice));
}
