//! Domain models shared across cvkit.
//!
//! - [`ApplicationData`] - canonical résumé data produced by the importers
//! - [`PersonalData`], [`WorkExperience`], [`Education`] - its sections
//! - [`WorkInterval`] - one employment period as seen by the gap detector
//! - [`GapRecord`] - a detected gap between two intervals
//! - [`YearMonth`] - calendar month used for all date arithmetic

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Year / Month
// =============================================================================

/// A calendar month. Arithmetic works on `(year, month)` pairs only,
/// never on days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Build from parts; `None` unless `1 <= month <= 12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Month containing a chrono date.
    pub fn from_date<D: chrono::Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Parse a canonical `YYYY-MM` string.
    pub fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.trim().split_once('-')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    /// Whole months from `self` to `other`: `(yB - yA) * 12 + (mB - mA)`.
    pub fn months_until(&self, other: YearMonth) -> i32 {
        (other.year - self.year) * 12 + (other.month as i32 - self.month as i32)
    }

    /// Shift by `n` months (negative goes back).
    pub fn add_months(&self, n: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + n;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("expected YYYY-MM, got '{}'", s))
    }
}

// =============================================================================
// Application Data (canonical import shape)
// =============================================================================

/// Contact block of a résumé.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalData {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
}

impl PersonalData {
    /// "First Last", trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// One position in the work history.
///
/// Dates are `YYYY-MM` when the source could be normalized, otherwise the
/// raw token survives unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tasks: Vec<String>,
}

/// One education entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field_of_study: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Canonical résumé data as produced by the provider importers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationData {
    #[serde(default)]
    pub personal_data: PersonalData,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default)]
    pub education: Vec<Education>,
}

impl ApplicationData {
    /// Work history as gap-detector input.
    pub fn work_intervals(&self) -> Vec<WorkInterval> {
        self.work_experience.iter().map(WorkInterval::from).collect()
    }

    /// All free text of the résumé joined by newlines, for keyword matching.
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for job in &self.work_experience {
            parts.push(&job.position);
            parts.push(&job.company);
            parts.extend(job.tasks.iter().map(String::as_str));
        }
        for edu in &self.education {
            parts.push(&edu.degree);
            parts.push(&edu.field_of_study);
            parts.push(&edu.institution);
        }
        parts.retain(|p| !p.trim().is_empty());
        parts.join("\n")
    }
}

// =============================================================================
// Gap detection
// =============================================================================

/// One employment period as input to the gap detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkInterval {
    pub id: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
}

impl WorkInterval {
    pub fn new(id: impl Into<String>, start: impl Into<String>, end: Option<&str>) -> Self {
        Self {
            id: id.into(),
            start_date: start.into(),
            end_date: end.map(String::from),
            current: false,
        }
    }

    /// An open-ended interval ending "now".
    pub fn ongoing(id: impl Into<String>, start: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start_date: start.into(),
            end_date: None,
            current: true,
        }
    }
}

impl From<&WorkExperience> for WorkInterval {
    fn from(job: &WorkExperience) -> Self {
        let end = job.end_date.trim();
        Self {
            id: job.id.clone(),
            start_date: job.start_date.clone(),
            end_date: (!end.is_empty()).then(|| end.to_string()),
            current: job.current,
        }
    }
}

/// A gap between two adjacent work intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapRecord {
    /// Id of the newer interval (the one after the gap).
    pub after_position_id: String,
    /// Id of the older interval (the one before the gap).
    pub before_position_id: String,
    /// First month without employment.
    pub start_date: String,
    /// Last month without employment.
    pub end_date: String,
    /// Month difference between the older end and the newer start.
    pub months: u32,
}

// =============================================================================
// Tests
// =============================================================================
