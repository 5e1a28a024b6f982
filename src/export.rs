//! CSV export of the call log

use crate::display::render_timestamp;
use crate::error::ExportError;
use crate::types::LogEntry;
use std::fs;
use std::path::{Path, PathBuf};

pub const EXPORT_FILE_NAME: &str = "data.csv";

pub const CSV_HEADERS: [&str; 7] = [
    "Created At",
    "Model",
    "Time",
    "Prompt Tokens",
    "Completion Tokens",
    "Quota",
    "Content",
];

/// Spreadsheet apps need the BOM to pick UTF-8
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Serialize `logs` to CSV bytes, header row always included
pub fn render_csv(logs: &[LogEntry]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(CSV_HEADERS)?;

    for log in logs {
        writer.write_record([
            render_timestamp(log.created_at),
            log.model_name.clone(),
            log.use_time.to_string(),
            log.prompt_tokens.to_string(),
            log.completion_tokens.to_string(),
            log.quota.to_string(),
            log.content.clone(),
        ])?;
    }

    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

/// Write `data.csv` into `dir`, returning the full path
pub fn export_csv(logs: &[LogEntry], dir: &Path) -> Result<PathBuf, ExportError> {
    let bytes = render_csv(logs)?;

    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, bytes)?;

    tracing::info!(path = %path.display(), rows = logs.len(), "exported call log");
    Ok(path)
}
