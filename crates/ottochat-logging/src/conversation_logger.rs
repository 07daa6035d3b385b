use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use ottochat_models::ChatMessage;

#[derive(Serialize)]
struct LogEntry {
    timestamp: String, // ISO-8601 UTC
    role: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_form: Option<bool>,
}

/// Append-only JSONL transcript of one widget session.
///
/// Write failures are reported on stderr and never propagated; a broken log
/// file must not take the conversation down with it.
pub struct ConversationLogger {
    file_path: PathBuf,
    file: Option<tokio::fs::File>,
}

impl ConversationLogger {
    /// Create a new logger; generates the file name based on the current UTC time.
    pub async fn new(logs_dir: &Path) -> Result<Self> {
        fs::create_dir_all(logs_dir).await?;

        let now: DateTime<Utc> = Utc::now();
        let filename = format!("otto-{}.jsonl", now.format("%Y-%m-%d-%H%M%S"));
        let file_path = logs_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await?;
        Ok(Self {
            file_path,
            file: Some(file),
        })
    }

    /// Append a single log entry.
    pub async fn log(&mut self, role: &str, content: &str) {
        self.write_entry(LogEntry {
            timestamp: Utc::now().to_rfc3339(),
            role: role.to_string(),
            content: content.to_string(),
            is_form: None,
        })
        .await;
    }

    /// Append a conversation turn as it was stored in the session.
    pub async fn log_message(&mut self, msg: &ChatMessage) {
        self.write_entry(LogEntry {
            timestamp: msg.timestamp.to_rfc3339(),
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
            is_form: if msg.is_form { Some(true) } else { None },
        })
        .await;
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    async fn write_entry(&mut self, entry: LogEntry) {
        if let Some(file) = &mut self.file {
            if let Ok(json) = serde_json::to_string(&entry) {
                if let Err(e) = file.write_all(json.as_bytes()).await {
                    eprintln!("[Logging error] {}", e);
                } else if let Err(e) = file.write_all(b"\n").await {
                    eprintln!("[Logging error] {}", e);
                }
            }
        }
    }
}
