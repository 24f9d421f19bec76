//! Error taxonomy for component promotion.

/// Errors produced by resolution and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum PromoteError {
    #[error("no version number found in component identifier: {identifier}")]
    InvalidIdentifier { identifier: String },

    #[error("no mapping entry matches base name: {base_name}")]
    NoMatch { base_name: String },

    #[error(
        "path template for '{component_key}' must contain exactly one \
         version placeholder, found {placeholders}"
    )]
    InvalidTemplate {
        component_key: String,
        placeholders: usize,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for promotion operations.
pub type Result<T> = std::result::Result<T, PromoteError>;
