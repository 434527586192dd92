//! Result decoding and the error taxonomy.
//!
//! The CLI prints JSON for most commands but bare scalars (an address, a
//! balance, a signature) for others, and the expected shape is not known in
//! advance. Decoding is therefore structured-first with a plain-text fallback.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::proxy::invoker::RawOutcome;

/// Classification of a failed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The command outlived its deadline and was killed.
    Timeout,
    /// The command exited non-zero.
    ProcessError,
    /// The command could not be started.
    InvocationError,
    /// The caller's input was rejected before anything ran.
    ValidationError,
    /// The collaborator answered, but not with what the operation needed.
    UpstreamError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::ProcessError => "process_error",
            Self::InvocationError => "invocation_error",
            Self::ValidationError => "validation_error",
            Self::UpstreamError => "upstream_error",
        }
    }
}

/// A failed command or rejected operation, with human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct CommandError {
    pub kind: ErrorKind,
    pub detail: String,
}

impl CommandError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationError, detail)
    }

    pub fn upstream(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::UpstreamError, detail)
    }

    /// Keep the kind, replace the detail.
    pub fn with_detail(self, detail: impl Into<String>) -> Self {
        Self::new(self.kind, detail)
    }

    /// The `{error, kind}` object shown to callers.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "error": self.detail,
            "kind": self.kind,
        })
    }
}

/// Result of a single command invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// stdout parsed as JSON.
    Decoded(Value),
    /// stdout was not JSON; trimmed text.
    PlainText(String),
    /// The command did not produce a usable result.
    Failed(CommandError),
}

impl CommandResult {
    pub fn failed(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self::Failed(CommandError::new(kind, detail))
    }

    /// Textual scalar result, as returned by commands such as `getnewaddress`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::PlainText(text) => Some(text),
            Self::Decoded(Value::String(text)) => Some(text),
            _ => None,
        }
    }

    /// Split into the successful payload or the failure.
    ///
    /// Plain text becomes a JSON string.
    pub fn into_result(self) -> Result<Value, CommandError> {
        match self {
            Self::Decoded(value) => Ok(value),
            Self::PlainText(text) => Ok(Value::String(text)),
            Self::Failed(err) => Err(err),
        }
    }

    /// Render as a JSON value, with failures as `{error, kind}` objects.
    pub fn into_value(self) -> Value {
        match self.into_result() {
            Ok(value) => value,
            Err(err) => err.to_json(),
        }
    }
}

/// Turn a raw process outcome into a `CommandResult`. Never panics.
pub fn decode(outcome: RawOutcome) -> CommandResult {
    match outcome {
        RawOutcome::TimedOut => CommandResult::failed(ErrorKind::Timeout, "command timed out"),
        RawOutcome::FailedToStart { cause } => {
            CommandResult::failed(ErrorKind::InvocationError, cause)
        }
        RawOutcome::Exited { code, stderr, .. } if code != 0 => {
            let stderr = String::from_utf8_lossy(&stderr);
            let detail = stderr.trim();
            if detail.is_empty() {
                CommandResult::failed(
                    ErrorKind::ProcessError,
                    format!("command exited with status {}", code),
                )
            } else {
                CommandResult::failed(ErrorKind::ProcessError, detail)
            }
        }
        RawOutcome::Exited { stdout, .. } => {
            let stdout = String::from_utf8_lossy(&stdout);
            let text = stdout.trim();
            match serde_json::from_str::<Value>(text) {
                Ok(value) => CommandResult::Decoded(value),
                Err(_) => CommandResult::PlainText(text.to_string()),
            }
        }
    }
}
