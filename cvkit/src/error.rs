//! Error types for cvkit.
//!
//! The pure modules (parser, normalizers, gap detector, analysis) never fail:
//! missing data becomes empty values plus warnings. Errors only appear at the
//! edges that touch the filesystem, the environment or the command line:
//!
//! - [`CsvError`] - reading and decoding section files
//! - [`ImportError`] - export directory import and provider selection
//! - [`ConfigError`] - invalid environment settings
//! - [`CliError`] - top-level command errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV File Errors
// =============================================================================

/// Errors while reading a delimited text file from disk.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Bytes could not be decoded with the detected encoding.
    #[error("Failed to decode content as {encoding}: {message}")]
    Encoding { encoding: String, message: String },

    /// File exceeds the import size limit.
    #[error("File too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },
}

// =============================================================================
// Import Errors
// =============================================================================

/// Errors from the import orchestration layer.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A section file could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Export directory could not be listed.
    #[error("Import IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No provider matches the section labels.
    #[error("Could not detect export provider from sections: {}", .0.join(", "))]
    UnknownProvider(Vec<String>),

    /// Unsupported provider name given explicitly.
    #[error("Unknown provider '{0}' (expected 'linkedin' or 'xing')")]
    InvalidProvider(String),

    /// Directory contains no CSV sections.
    #[error("No CSV sections found in {0}")]
    NoSections(String),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while reading settings from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

// =============================================================================
// CLI Errors (top-level)
// =============================================================================

/// Top-level error returned by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// CSV file error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Import error.
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// JSON input or output error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Plain IO error (output files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad argument value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Data failed schema validation.
    #[error("{0} validation error(s)")]
    Invalid(usize),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV file operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
