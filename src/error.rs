use std::fmt::{Display, Formatter};

/// Failures surfaced to the user by the load and mutation workflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Rejected before anything was sent to the API.
    Validation {
        message: String
    },
    /// The API answered with a non-success status.
    Remote {
        status: u16,
        status_text: String,
        body_text: String
    },
    /// No usable response was obtained.
    Transport {
        cause: String
    }
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation { message: message.into() }
    }

    pub fn transport(cause: impl Into<String>) -> Self {
        ClientError::Transport { cause: cause.into() }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation { .. })
    }
}

impl std::error::Error for ClientError {}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Validation { message } => write!(f, "{}", message),
            ClientError::Remote { status, status_text, body_text } => {
                write!(f, "{} {}", status, status_text)?;
                if !body_text.is_empty() {
                    write!(f, " - {}", body_text)?;
                }
                Ok(())
            }
            ClientError::Transport { cause } => write!(f, "Failed to reach the API: {}", cause)
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport { cause: err.to_string() }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Transport { cause: format!("Malformed JSON: {}", err) }
    }
}

/// Problems with the configuration, found before any API call is made.
#[derive(Debug)]
pub struct ConfigError {
    pub cause: String
}

impl std::error::Error for ConfigError {}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "cause: {}", self.cause)
    }
}

impl From<String> for ConfigError {
    fn from(cause: String) -> Self {
        Self { cause }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self { cause: format!("Failed to read config file: {}", err) }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self { cause: format!("Failed to deserialize config file: {}", err) }
    }
}
