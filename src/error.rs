use thiserror::Error;

#[derive(Error, Debug)]
pub enum CouncilError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid suggestion: {0}")]
    InvalidSuggestion(String),

    #[error("Agent '{agent}' failed: {message}")]
    Agent { agent: String, message: String },

    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    #[error("Cannot review {path}: {reason}")]
    UnreviewableSource { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CouncilError {
    pub fn agent(agent: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Agent {
            agent: agent.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CouncilError>;
