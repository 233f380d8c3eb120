//! Import orchestration.
//!
//! Picks the provider (explicit or detected from section labels), runs the
//! shared normalizer and merges all warnings into one list. The directory
//! entry point reads an unpacked export where every `*.csv` file is one
//! section named after its file stem.
//!
//! # Example
//!
//! ```rust,ignore
//! use cvkit::import::import_export_dir;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = import_export_dir(Path::new("Basic_LinkedInDataExport"), None).await?;
//!     println!("{} positions, {} warnings", report.data.work_experience.len(), report.warnings.len());
//!     Ok(())
//! }
//! ```

use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use super::normalize::normalize_sections;
use super::provider::Provider;
use crate::config::MAX_IMPORT_FILE_SIZE;
use crate::error::{CsvError, ImportError, ImportResult};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::ApplicationData;
use crate::parser::decode_bytes;

/// Result of a complete import run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Provider used for normalization
    pub provider: Provider,
    /// Canonical application data
    pub data: ApplicationData,
    /// Orchestration warnings first, then normalizer warnings
    pub warnings: Vec<String>,
}

/// Import already loaded sections.
///
/// With `provider == None` the provider is detected from the section labels.
pub fn import_sections(
    sections: &HashMap<String, String>,
    provider: Option<Provider>,
) -> ImportResult<ImportReport> {
    import_with_warnings(sections, provider, Vec::new())
}

/// Import an unpacked export directory.
pub async fn import_export_dir(
    dir: &Path,
    provider: Option<Provider>,
) -> ImportResult<ImportReport> {
    log_info(format!("Reading export directory: {}", dir.display()));

    let mut paths = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(ImportError::NoSections(dir.display().to_string()));
    }

    let mut sections = HashMap::new();
    let mut warnings = Vec::new();

    for path in &paths {
        let label = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        match read_section(path).await {
            Ok(text) => {
                log_info_indent(format!("{} ({} bytes)", label, text.len()), 1);
                sections.insert(label, text);
            }
            Err(e) => {
                let file = path.file_name().and_then(|s| s.to_str()).unwrap_or_default();
                let message = format!("{} konnte nicht gelesen werden: {}", file, e);
                log_warning(&message);
                warnings.push(message);
            }
        }
    }

    import_with_warnings(&sections, provider, warnings)
}

async fn read_section(path: &Path) -> Result<String, CsvError> {
    let size = tokio::fs::metadata(path).await?.len();
    if size > MAX_IMPORT_FILE_SIZE {
        return Err(CsvError::TooLarge { size, limit: MAX_IMPORT_FILE_SIZE });
    }
    let bytes = tokio::fs::read(path).await?;
    decode_bytes(&bytes)
}

fn import_with_warnings(
    sections: &HashMap<String, String>,
    provider: Option<Provider>,
    mut warnings: Vec<String>,
) -> ImportResult<ImportReport> {
    let provider = match provider {
        Some(p) => p,
        None => {
            let detected = Provider::detect(sections.keys().map(String::as_str));
            detected.ok_or_else(|| {
                let mut labels: Vec<String> = sections.keys().cloned().collect();
                labels.sort();
                ImportError::UnknownProvider(labels)
            })?
        }
    };
    log_success(format!("Provider: {}", provider));

    let outcome = normalize_sections(provider, sections);
    for warning in &outcome.warnings {
        log_warning(warning);
    }
    warnings.extend(outcome.warnings);

    log_success(format!(
        "{} positions, {} education entries",
        outcome.data.work_experience.len(),
        outcome.data.education.len()
    ));

    Ok(ImportReport {
        provider,
        data: outcome.data,
        warnings,
    })
}
