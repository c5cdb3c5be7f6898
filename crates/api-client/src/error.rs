use thiserror::Error;

/// Errors that can occur when calling the TechSolutions API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response without a readable message.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// The backend refused the operation and said why.
    #[error("{0}")]
    Rejected(String),

    /// Response body was not the expected JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Base URL cannot be used to build endpoint paths.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Message safe to show to an operator or customer.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            Self::Http(_) => "No se pudo conectar con el servidor.".to_owned(),
            Self::Status { status, .. } => format!("El servidor respondió con error {status}."),
            Self::Parse(_) | Self::InvalidUrl(_) => {
                "Respuesta inesperada del servidor.".to_owned()
            }
        }
    }
}
