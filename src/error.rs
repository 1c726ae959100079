//! Error types for pwa-windows-pack

use crate::validation::ValidationError;
use thiserror::Error;

/// Result type for publish operations
pub type PublishResult<T> = Result<T, PublishError>;

/// Errors that can occur while building or submitting a Windows package request
#[derive(Error, Debug)]
pub enum PublishError {
    /// No options were supplied to the generator
    #[error("Invalid Windows options. No options specified.")]
    MissingOptions,

    /// Options failed field validation
    #[error("Invalid Windows options. {}", join_validation_errors(.0))]
    InvalidOptions(Vec<ValidationError>),

    /// No manifest available to derive options from
    #[error("No manifest found, Double check that you have a manifest")]
    MissingManifest,

    /// The application URL could not be resolved
    #[error("Can't find the current URL")]
    MissingUrl,

    /// The manifest URL could not be resolved
    #[error("Can't find the manifest URL")]
    MissingManifestUrl,

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The generator answered with a non-200 status
    #[error("Failed. Status code {status}, Error: {status_text}, Details: {details}")]
    Service {
        status: u16,
        status_text: String,
        details: String,
    },

    /// Transport or serialization failure during submission
    #[error("Failed. Error: {0}")]
    Submission(String),

    /// Invalid web manifest
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generated package could not be inspected
    #[error("Package error: {0}")]
    Package(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

fn join_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.error.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
