//! Error types for promogen.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in promogen operations.
#[derive(Error, Debug)]
pub enum PromoError {
    /// Input the user has to correct: dates, times, titles, URLs, slugs, meta.json content.
    #[error("{0}")]
    Format(String),

    #[error("Folder already exists: {}", .0.display())]
    Collision(PathBuf),

    #[error("`{command}` failed with exit code {}\n{}", render_code(.code), render_streams(.stdout, .stderr))]
    ExternalTool {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("'{0}' not found in PATH")]
    MissingTool(String),

    #[error("`{command}` timed out after {secs}s")]
    ToolTimeout { command: String, secs: u64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PromoError {
    pub fn format(message: impl Into<String>) -> Self {
        PromoError::Format(message.into())
    }
}

fn render_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "?".to_string(), |c| c.to_string())
}

fn render_streams(stdout: &str, stderr: &str) -> String {
    let mut parts = Vec::new();
    if !stdout.trim().is_empty() {
        parts.push(format!("stdout:\n{}", stdout.trim_end()));
    }
    if !stderr.trim().is_empty() {
        parts.push(format!("stderr:\n{}", stderr.trim_end()));
    }
    parts.join("\n")
}

/// Result type alias for promogen operations.
pub type PromoResult<T> = Result<T, PromoError>;
