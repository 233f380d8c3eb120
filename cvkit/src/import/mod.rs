//! Import module.
//!
//! This module turns professional-network CSV exports into canonical
//! [`ApplicationData`](crate::models::ApplicationData):
//! - Dates: provider date tokens to `YYYY-MM`
//! - Provider: per-provider alias tables and warnings
//! - Normalize: the shared section normalizer
//! - Pipeline: provider selection, directory import, warning merge

pub mod dates;
pub mod normalize;
pub mod pipeline;
pub mod provider;

pub use dates::{normalize_date, normalize_date_token, DateFormat};
pub use normalize::{normalize_sections, ImportOutcome};
pub use pipeline::{import_export_dir, import_sections, ImportReport};
pub use provider::{Provider, ProviderProfile};
