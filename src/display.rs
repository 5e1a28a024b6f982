//! Text formatting shared by the table, the summary and the CSV export

use crate::types::LogEntry;
use chrono::{Local, TimeZone};
use serde::Deserialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Quota units per currency unit ($1 = 500000 quota)
pub const QUOTA_PER_UNIT: f64 = 500_000.0;

/// Digits used for quota values in the call table
pub const QUOTA_DIGITS: usize = 6;

/// Shown instead of a price breakdown when a row's metadata can't be decoded
pub const PRICE_UNSUPPORTED: &str = "This version does not support displaying calculation details";

/// Render unix seconds as local `YYYY-MM-DD HH:MM:SS`
pub fn render_timestamp(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

/// Render a quota amount in currency with `digits` decimals
pub fn render_quota(quota: i64, digits: usize) -> String {
    format!("${:.*}", digits, quota as f64 / QUOTA_PER_UNIT)
}

pub fn render_use_time(seconds: i64) -> String {
    format!("{seconds} s")
}

pub fn render_is_stream(is_stream: bool) -> &'static str {
    if is_stream {
        "Stream"
    } else {
        "Non-stream"
    }
}

/// Band for the elapsed-time tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elapsed {
    Fast,
    Slow,
    VerySlow,
}

impl Elapsed {
    pub fn from_seconds(seconds: i64) -> Self {
        if seconds < 101 {
            Elapsed::Fast
        } else if seconds < 300 {
            Elapsed::Slow
        } else {
            Elapsed::VerySlow
        }
    }
}

/// Deterministic palette slot for a string: sum of UTF-16 code units modulo `palette_len`
pub fn color_index(text: &str, palette_len: usize) -> usize {
    if palette_len == 0 {
        return 0;
    }
    let sum: usize = text.encode_utf16().map(usize::from).sum();
    sum % palette_len
}

/// Pricing fields carried in a log entry's `other` column
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PriceMetadata {
    pub model_ratio: f64,
    /// Fixed per-call price, -1 when the model is priced by ratio
    pub model_price: f64,
    pub completion_ratio: f64,
    pub group_ratio: f64,
}

impl Default for PriceMetadata {
    fn default() -> Self {
        Self {
            model_ratio: 0.0,
            model_price: -1.0,
            completion_ratio: 0.0,
            group_ratio: 1.0,
        }
    }
}

/// What the detail pane shows next to a row's content
#[derive(Debug, Clone, PartialEq)]
pub enum ContentDetail {
    /// Metadata present but unreadable
    Unsupported,
    /// Metadata decodes to `null`
    Plain,
    Breakdown(Vec<String>),
}

pub fn content_detail(entry: &LogEntry) -> ContentDetail {
    let raw = match entry.other.as_deref() {
        None | Some("") => "{}",
        Some(raw) => raw,
    };

    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => return ContentDetail::Unsupported,
    };

    if value.is_null() {
        return ContentDetail::Plain;
    }

    match serde_json::from_value::<PriceMetadata>(value) {
        Ok(meta) => ContentDetail::Breakdown(render_model_price(
            entry.prompt_tokens,
            entry.completion_tokens,
            &meta,
        )),
        Err(_) => ContentDetail::Unsupported,
    }
}

/// Explain how a call's cost was computed
pub fn render_model_price(
    prompt_tokens: i64,
    completion_tokens: i64,
    meta: &PriceMetadata,
) -> Vec<String> {
    let group = meta.group_ratio;

    if meta.model_price != -1.0 {
        return vec![format!(
            "Model price: ${} * Group ratio: {} = ${}",
            meta.model_price,
            group,
            meta.model_price * group
        )];
    }

    let input_price = meta.model_ratio * 2.0;
    let completion_price = input_price * meta.completion_ratio;
    let price = prompt_tokens as f64 / 1_000_000.0 * input_price * group
        + completion_tokens as f64 / 1_000_000.0 * completion_price * group;

    vec![
        format!(
            "Prompt price: ${input_price} * {group} = ${} / 1M tokens",
            input_price * group
        ),
        format!(
            "Completion price: ${completion_price} * {group} = ${} / 1M tokens",
            completion_price * group
        ),
        format!(
            "Prompt {prompt_tokens} tokens / 1M tokens * ${input_price} + Completion {completion_tokens} tokens / 1M tokens * ${completion_price} * {group} = ${price:.6}"
        ),
    ]
}

/// Cut `text` into at most `rows` lines of `width` terminal columns, marking truncation
pub fn preview_lines(text: &str, width: usize, rows: usize) -> Vec<String> {
    if width == 0 || rows == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    let mut truncated = false;

    for c in text.chars().map(|c| if c.is_control() { ' ' } else { c }) {
        let char_width = c.width().unwrap_or(0);
        if used + char_width > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            used = 0;
            if lines.len() == rows {
                truncated = true;
                break;
            }
        }
        current.push(c);
        used += char_width;
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if truncated {
        if let Some(last) = lines.last_mut() {
            while !last.is_empty() && last.width() + 1 > width {
                last.pop();
            }
            last.push('…');
        }
    }

    lines
}
