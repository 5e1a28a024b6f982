use serde::Deserialize;
use std::time::Instant;

/// Model names with this prefix are image-generation jobs; timing and
/// prompt columns carry no meaning for them.
pub const IMAGE_MODEL_PREFIX: &str = "mj_";

/// Balance value the backend reports for tokens without a hard limit
pub const UNLIMITED_BALANCE: f64 = 100_000_000.0;

/// One call record as returned by `/api/log/token`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogEntry {
    pub created_at: i64,
    pub token_name: String,
    pub model_name: String,
    /// Elapsed seconds
    pub use_time: i64,
    pub is_stream: bool,
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub quota: i64,
    pub content: String,

    #[serde(rename = "type")]
    pub log_type: i64,

    /// JSON-encoded pricing metadata, may be empty or malformed
    pub other: Option<String>,
}

impl LogEntry {
    /// Classify the entry once so renderers don't re-check type codes per column
    pub fn classify(&self) -> RowClass {
        let kind = match self.log_type {
            0 | 2 => LogKind::Chat,
            _ => LogKind::Other,
        };

        RowClass {
            kind,
            image_generation: self.model_name.starts_with(IMAGE_MODEL_PREFIX),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Consumption records (type 0 and 2), the only rows with billing columns
    Chat,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowClass {
    pub kind: LogKind,
    pub image_generation: bool,
}

impl RowClass {
    pub fn is_chat(&self) -> bool {
        self.kind == LogKind::Chat
    }

    /// Which table cells carry a value for `entry`; hidden cells render blank
    pub fn visible_cells(&self, entry: &LogEntry) -> CellVisibility {
        let chat = self.is_chat();

        CellVisibility {
            token_name: chat,
            model: chat,
            time: !self.image_generation,
            prompt_tokens: chat && !self.image_generation,
            completion_tokens: chat && entry.completion_tokens > 0,
            quota: chat,
        }
    }
}

/// Per-row visibility of the gated call table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellVisibility {
    pub token_name: bool,
    pub model: bool,
    /// Elapsed time and the stream tag
    pub time: bool,
    pub prompt_tokens: bool,
    pub completion_tokens: bool,
    pub quota: bool,
}

/// Expiry of a token as reported by the subscription endpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccessDate {
    Never,
    At(i64),
    Unknown,
}

/// Everything known about a token on one endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub balance: f64,
    pub usage: f64,
    pub access_date: AccessDate,
    /// Newest first
    pub logs: Vec<LogEntry>,
    pub token_valid: bool,
}

impl QueryResult {
    pub const EMPTY: Self = Self {
        balance: 0.0,
        usage: 0.0,
        access_date: AccessDate::Unknown,
        logs: Vec::new(),
        token_valid: false,
    };

    pub fn is_unlimited(&self) -> bool {
        self.balance == UNLIMITED_BALANCE
    }
}

impl Default for QueryResult {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionResponse {
    pub hard_limit_usd: f64,

    /// Unix seconds, 0 when the token never expires
    #[serde(default)]
    pub access_until: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsageResponse {
    /// Cents
    pub total_usage: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogResponse {
    pub success: bool,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub data: Option<Vec<LogEntry>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// Short-lived message shown in the corner of the screen
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub created: Instant,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}

/// Blocking dialog, used when text has to be copied by hand
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EnteringToken,
    JumpToPage,
}

/// The two collapsible sections below the token input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    TokenInfo,
    CallDetails,
}
