//! Token information lines, shared by the panel and the clipboard copy

use crate::display::render_timestamp;
use crate::types::{AccessDate, QueryResult};

pub fn total_label(result: &QueryResult) -> String {
    if result.is_unlimited() {
        "Unlimited".to_string()
    } else {
        format!("{:.3}", result.balance)
    }
}

pub fn remaining_label(result: &QueryResult) -> String {
    if result.is_unlimited() {
        "No Restrictions".to_string()
    } else {
        format!("{:.3}", result.balance - result.usage)
    }
}

pub fn used_label(result: &QueryResult) -> String {
    if result.is_unlimited() {
        "No Calculation".to_string()
    } else {
        format!("{:.3}", result.usage)
    }
}

pub fn valid_until_label(result: &QueryResult) -> String {
    match result.access_date {
        AccessDate::Never => "Never Expires".to_string(),
        AccessDate::Unknown => "Unknown".to_string(),
        AccessDate::At(timestamp) => render_timestamp(timestamp),
    }
}

/// `(label, value)` pairs in display order
pub fn summary_lines(result: &QueryResult) -> [(&'static str, String); 4] {
    [
        ("Total Tokens", total_label(result)),
        ("Remaining Amount", remaining_label(result)),
        ("Used Amount", used_label(result)),
        ("Valid Until", valid_until_label(result)),
    ]
}

/// Four-line plain text block for the clipboard
pub fn summary_text(result: &QueryResult) -> String {
    summary_lines(result)
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
