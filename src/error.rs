use thiserror::Error;

/// Failure taxonomy for the orchestration services.
///
/// `Display` is the localized, user-presentable message for each failure.
/// The internal cause lives in `detail` and is only ever logged, never
/// returned to a caller.
#[derive(Debug, Error)]
pub enum DermaError {
    /// Missing or invalid startup configuration (e.g. no API key).
    #[error("{0}")]
    Config(String),

    /// The model call itself failed: network, timeout, remote error, or an
    /// empty response body.
    #[error("{user_message}")]
    Generation { user_message: String, detail: String },

    /// The model answered, but the text was not the JSON shape we asked for.
    #[error("{user_message}")]
    Parse { user_message: String, detail: String },

    /// The JSON parsed but carried out-of-range or inconsistent values.
    #[error("{user_message}")]
    Validation { user_message: String, detail: String },

    /// A non-model collaborator (the report webhook) failed.
    #[error("{user_message}")]
    Downstream { user_message: String, detail: String },
}

impl DermaError {
    pub fn generation(user_message: &str, detail: impl ToString) -> Self {
        DermaError::Generation {
            user_message: user_message.to_string(),
            detail: detail.to_string(),
        }
    }

    pub fn parse(user_message: &str, detail: impl ToString) -> Self {
        DermaError::Parse {
            user_message: user_message.to_string(),
            detail: detail.to_string(),
        }
    }

    pub fn validation(user_message: &str, detail: impl ToString) -> Self {
        DermaError::Validation {
            user_message: user_message.to_string(),
            detail: detail.to_string(),
        }
    }

    pub fn downstream(user_message: &str, detail: impl ToString) -> Self {
        DermaError::Downstream {
            user_message: user_message.to_string(),
            detail: detail.to_string(),
        }
    }

    /// Internal cause for logging. Empty for configuration errors, whose
    /// message is already the full story.
    pub fn detail(&self) -> &str {
        match self {
            DermaError::Config(_) => "",
            DermaError::Generation { detail, .. }
            | DermaError::Parse { detail, .. }
            | DermaError::Validation { detail, .. }
            | DermaError::Downstream { detail, .. } => detail,
        }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
