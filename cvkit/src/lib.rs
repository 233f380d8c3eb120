//! # cvkit - résumé data import and checks
//!
//! cvkit turns the CSV exports of professional networks (LinkedIn, XING) into
//! canonical application data and runs quality checks on it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV export │────▶│   Parser    │────▶│  Provider   │────▶│ Application │
//! │ (sections)  │     │ (quoted)    │     │ normalizer  │     │  data JSON  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                                    │
//!                          ┌──────────────────┬──────────────────────┤
//!                          ▼                  ▼                      ▼
//!                   ┌─────────────┐    ┌─────────────┐        ┌─────────────┐
//!                   │    Gaps     │    │  Keywords   │        │     ATS     │
//!                   │ (timeline)  │    │  Tonality   │        │  checklist  │
//!                   └─────────────┘    └─────────────┘        └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cvkit::{import_export_dir, detect_gaps_in, format_duration, SystemClock};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() {
//!     let report = import_export_dir(Path::new("export"), None).await.unwrap();
//!     for gap in detect_gaps_in(&report.data, &SystemClock) {
//!         println!("{} – {}: {}", gap.start_date, gap.end_date, format_duration(gap.months));
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Application data, work intervals, gap records
//! - [`config`] - Constants and environment settings
//! - [`logs`] - Progress log broadcasting
//! - [`parser`] - CSV parsing with encoding detection
//! - [`import`] - Provider date normalization and export import
//! - [`timeline`] - Gap detection and German formatting
//! - [`analysis`] - Keyword, tonality and ATS checks
//! - [`validation`] - Application data schema validation

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Parsing
pub mod parser;

// Import
pub mod import;

// Timeline
pub mod timeline;

// Analysis
pub mod analysis;

// Validation
pub mod validation;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CliError, ConfigError, CsvError, ImportError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    ApplicationData,
    Education,
    GapRecord,
    PersonalData,
    WorkExperience,
    WorkInterval,
    YearMonth,
};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_bytes,
    decode_content,
    detect_encoding,
    parse_delimited,
    parse_with_headers,
    read_text_file,
    ParseResult,
    Record,
};

// =============================================================================
// Re-exports - Import
// =============================================================================

pub use import::{
    import_export_dir,
    import_sections,
    normalize_date,
    normalize_date_token,
    normalize_sections,
    DateFormat,
    ImportOutcome,
    ImportReport,
    Provider,
};

// =============================================================================
// Re-exports - Timeline
// =============================================================================

pub use timeline::{
    detect_gaps,
    detect_gaps_in,
    detect_gaps_with_threshold,
    format_date_range,
    format_duration,
    format_month_label,
    Clock,
    FixedClock,
    SystemClock,
};

// =============================================================================
// Re-exports - Analysis
// =============================================================================

pub use analysis::{analyze_tonality, check_ats, extract_keywords, match_keywords};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid, is_valid_application_data, validate, validate_application_data};
