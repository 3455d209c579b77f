//! Error types for the AeroScript runtime

use thiserror::Error;

/// A static incompatibility found by the type checker
#[derive(Debug, Clone, PartialEq, Error)]
#[error("type error: {message}")]
pub struct TypeError {
    pub message: String,
}

impl TypeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Type(#[from] TypeError),

    #[error("insufficient battery: action costs {cost} but only {battery} is left")]
    InsufficientBattery { cost: f32, battery: f32 },

    #[error("battery depleted ({battery}) before action")]
    DepletedBattery { battery: f32 },

    #[error("mode '{id}' not found in {scope}")]
    UnknownModeReference { id: String, scope: String },

    #[error("message '{name}' not recognized by {mode}")]
    UnrecognizedMessage { name: String, mode: String },

    #[error("invalid expression: {0}")]
    InvalidExpressionShape(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    /// Errors the interactive session can report and keep going after
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::UnrecognizedMessage { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
