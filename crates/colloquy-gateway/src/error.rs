use std::fmt;

use thiserror::Error;

/// How a gateway failure should be treated by callers.
///
/// Every [`GatewayError`] maps to exactly one class: `Transient` failures are
/// eligible for a caller-level retry, `Invalid` requests are not, and
/// `NotFound` means the referenced thread/run/message is absent upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Transient,
    Invalid,
    NotFound,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorClass::Transient => "transient",
            ErrorClass::Invalid => "invalid",
            ErrorClass::NotFound => "not_found",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("assistant service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("assistant service error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("assistant service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("{0} not found upstream")]
    NotFound(String),

    #[error("unexpected response shape: {0}")]
    Decode(String),

    #[error("client configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    pub fn class(&self) -> ErrorClass {
        match self {
            GatewayError::Transport(_) | GatewayError::Upstream { .. } => ErrorClass::Transient,
            GatewayError::Rejected { .. }
            | GatewayError::Decode(_)
            | GatewayError::Config(_) => ErrorClass::Invalid,
            GatewayError::NotFound(_) => ErrorClass::NotFound,
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
