// src/error.rs
//! Error types for the GPS sender

use std::fmt;

pub type Result<T> = std::result::Result<T, SenderError>;

#[derive(Debug)]
pub enum SenderError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Resolve(String),
    Config(String),
    Other(String),
}

impl fmt::Display for SenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SenderError::Io(e) => write!(f, "IO error: {}", e),
            SenderError::Json(e) => write!(f, "JSON error: {}", e),
            SenderError::Resolve(msg) => write!(f, "Address resolution error: {}", msg),
            SenderError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            SenderError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SenderError::Io(e) => Some(e),
            SenderError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SenderError {
    fn from(error: std::io::Error) -> Self {
        SenderError::Io(error)
    }
}

impl From<serde_json::Error> for SenderError {
    fn from(error: serde_json::Error) -> Self {
        SenderError::Json(error)
    }
}
