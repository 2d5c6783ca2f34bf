//! Custom error types for devfolio
//!
//! User-friendly error messages for the few things that can go wrong outside
//! the view-model: the terminal, the config file and the content catalog.

use thiserror::Error;

/// Main error type for the devfolio application
#[derive(Error, Debug)]
pub enum FolioError {
    /// Terminal/TUI error
    #[error("Terminal error: {0}\n\n  → Try resizing your terminal or restarting it.")]
    Terminal(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Failed to serialize metadata: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization/deserialization error
    #[error("TOML document is invalid: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content catalog failed validation
    #[error("Portfolio content is invalid: {0}\n\n  → Check the catalog file passed with --content.")]
    Content(String),

    /// No node at the requested path
    #[error("'{0}' does not exist.\n\n  → Run 'devfolio tree --all' to see available files.")]
    DocumentNotFound(String),

    /// Path points at a folder
    #[error("'{0}' is a folder, not a document.")]
    NotADocument(String),

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),
}

impl From<toml::de::Error> for FolioError {
    fn from(err: toml::de::Error) -> Self {
        FolioError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for FolioError {
    fn from(err: toml::ser::Error) -> Self {
        FolioError::Toml(err.to_string())
    }
}

/// Result type alias using FolioError
pub type Result<T> = std::result::Result<T, FolioError>;
