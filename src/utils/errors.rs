use thiserror::Error;

/// Unified error type for a harness run.
///
/// Every variant is fatal: nothing inside the harness catches or retries it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Protocol error in `{method}`{}: {message}", fmt_code(.code))]
    Protocol {
        method: String,
        code: Option<i32>,
        message: String,
    },

    #[error("Assertion failed in {check}: {invariant} ({detail})")]
    Assertion {
        check: String,
        invariant: String,
        detail: String,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl HarnessError {
    pub fn protocol(method: &str, message: impl Into<String>) -> Self {
        HarnessError::Protocol {
            method: method.to_string(),
            code: None,
            message: message.into(),
        }
    }

    pub fn assertion(check: &str, invariant: &str, detail: impl Into<String>) -> Self {
        HarnessError::Assertion {
            check: check.to_string(),
            invariant: invariant.to_string(),
            detail: detail.into(),
        }
    }

    /// Process exit status for this failure kind. Zero is reserved for success.
    pub fn exit_code(&self) -> u8 {
        match self {
            HarnessError::Assertion { .. } => 1,
            HarnessError::Protocol { .. } => 2,
            HarnessError::Transport(_) => 3,
            HarnessError::InvalidRequest(_) | HarnessError::Config(_) => 4,
        }
    }
}

fn fmt_code(code: &Option<i32>) -> String {
    code.map(|c| format!(" (code {c})")).unwrap_or_default()
}

/// Convenience alias
pub type Result<T> = std::result::Result<T, HarnessError>;
