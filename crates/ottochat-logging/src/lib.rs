// Logging module - conversation transcript logging
pub mod conversation_logger;

use std::path::PathBuf;

use anyhow::{Context, Result};

// Re-export ConversationLogger so callers don't need the submodule path
pub use conversation_logger::ConversationLogger;

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = if max_chars >= 3 { max_chars - 3 } else { 0 };
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

/// Get or create the base ottochat directory (~/.ottochat)
pub fn get_ottochat_dir() -> Result<PathBuf> {
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Failed to get home directory")?;

    let ottochat_dir = PathBuf::from(home_dir).join(".ottochat");

    if !ottochat_dir.exists() {
        std::fs::create_dir_all(&ottochat_dir)
            .context("Failed to create ottochat directory")?;
    }

    Ok(ottochat_dir)
}

/// Get or create the logs directory (~/.ottochat/logs)
pub fn get_logs_dir() -> Result<PathBuf> {
    let logs_dir = get_ottochat_dir()?.join("logs");

    if !logs_dir.exists() {
        std::fs::create_dir_all(&logs_dir)
            .context("Failed to create logs directory")?;
    }

    Ok(logs_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_truncate_short_string() {
        let short_text = "Hello world";
        assert_eq!(safe_truncate(short_text, 100), short_text);
    }

    #[test]
    fn test_safe_truncate_long_string() {
        let long_text = "x".repeat(1000);
        let truncated = safe_truncate(&long_text, 100);

        assert_eq!(truncated.chars().count(), 100);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_safe_truncate_exact_boundary() {
        let text = "x".repeat(100);
        assert_eq!(safe_truncate(&text, 100), text);
    }

    #[test]
    fn test_safe_truncate_multibyte() {
        // char-based truncation must not split a multibyte character
        let text = "é".repeat(200);
        let truncated = safe_truncate(&text, 50);
        assert_eq!(truncated.chars().count(), 50);
        assert!(truncated.ends_with("..."));
    }
}
