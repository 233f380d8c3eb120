//! Provider profiles.
//!
//! Both supported exports carry the same information under different
//! section names, column names and date formats. A [`ProviderProfile`] is
//! the static table that tells the shared normalizer where to look.
//!
//! | Provider   | Sections                              | Dates               | Open end        |
//! |------------|---------------------------------------|---------------------|-----------------|
//! | `LinkedIn` | Profile, Positions, Education         | `Jan 2020`, `2010`  | empty           |
//! | `Xing`     | Profil, Berufserfahrung, Ausbildung   | `03.2020`, `2010`   | `heute`         |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::dates::DateFormat;
use crate::error::ImportError;

// =============================================================================
// Provider
// =============================================================================

/// Supported professional-network exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// English CSV export (Profile.csv, Positions.csv, Education.csv).
    LinkedIn,
    /// German CSV export (Profil, Berufserfahrung, Ausbildung).
    Xing,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::LinkedIn, Provider::Xing];

    /// Static profile for this provider.
    pub fn profile(&self) -> &'static ProviderProfile {
        match self {
            Provider::LinkedIn => &LINKEDIN,
            Provider::Xing => &XING,
        }
    }

    /// Pick the provider whose section names match the most labels.
    ///
    /// Returns `None` when nothing matches or two providers match equally.
    pub fn detect<'a, I>(labels: I) -> Option<Provider>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let labels: Vec<String> = labels.into_iter().map(normalize_label).collect();

        let mut scores: Vec<(Provider, usize)> = Self::ALL
            .iter()
            .map(|p| {
                let score = p
                    .profile()
                    .section_aliases()
                    .iter()
                    .filter(|aliases| labels.iter().any(|l| aliases.contains(&l.as_str())))
                    .count();
                (*p, score)
            })
            .collect();

        scores.sort_by(|a, b| b.1.cmp(&a.1));
        match scores.as_slice() {
            [(best, top), (_, second), ..] if *top > 0 && top > second => Some(*best),
            [(best, top)] if *top > 0 => Some(*best),
            _ => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().name)
    }
}

impl FromStr for Provider {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linkedin" => Ok(Provider::LinkedIn),
            "xing" => Ok(Provider::Xing),
            _ => Err(ImportError::InvalidProvider(s.to_string())),
        }
    }
}

/// Section labels compare lowercased, trimmed and without a `.csv` suffix.
pub fn normalize_label(label: &str) -> String {
    let lower = label.trim().to_lowercase();
    match lower.strip_suffix(".csv") {
        Some(stem) => stem.trim().to_string(),
        None => lower,
    }
}

// =============================================================================
// Profile tables
// =============================================================================

type Aliases = &'static [&'static str];

/// Column aliases per canonical field, first match wins.
#[derive(Debug)]
pub struct ColumnAliases {
    pub first_name: Aliases,
    pub last_name: Aliases,
    pub email: Aliases,
    pub phone: Aliases,
    pub city: Aliases,
    pub company: Aliases,
    pub position: Aliases,
    pub start_date: Aliases,
    pub end_date: Aliases,
    pub location: Aliases,
    pub description: Aliases,
    pub institution: Aliases,
    pub degree: Aliases,
    pub field_of_study: Aliases,
    pub education_start: Aliases,
    pub education_end: Aliases,
}

/// Warning text for each missing section.
#[derive(Debug)]
pub struct SectionWarnings {
    pub profile: &'static str,
    pub experience: &'static str,
    pub education: &'static str,
}

/// Everything the shared normalizer needs to know about one provider.
#[derive(Debug)]
pub struct ProviderProfile {
    pub name: &'static str,
    /// Lowercase section labels
    pub profile_sections: Aliases,
    pub experience_sections: Aliases,
    pub education_sections: Aliases,
    pub columns: ColumnAliases,
    pub date_formats: &'static [DateFormat],
    /// Lowercase end-date values meaning "still employed"
    pub present_sentinels: Aliases,
    pub warnings: SectionWarnings,
}

impl ProviderProfile {
    fn section_aliases(&self) -> [Aliases; 3] {
        [self.profile_sections, self.experience_sections, self.education_sections]
    }

    /// True when an end-date token marks an ongoing position.
    pub fn is_present(&self, end: &str) -> bool {
        let end = end.trim().to_lowercase();
        end.is_empty() || self.present_sentinels.contains(&end.as_str())
    }
}

pub static LINKEDIN: ProviderProfile = ProviderProfile {
    name: "LinkedIn",
    profile_sections: &["profile"],
    experience_sections: &["positions", "experience"],
    education_sections: &["education"],
    columns: ColumnAliases {
        first_name: &["First Name"],
        last_name: &["Last Name"],
        email: &["Email Address", "Email"],
        phone: &["Phone Number", "Phone Numbers", "Phone"],
        city: &["Geo Location", "Location", "City"],
        company: &["Company Name", "Company"],
        position: &["Title", "Position"],
        start_date: &["Started On", "Start Date"],
        end_date: &["Finished On", "End Date"],
        location: &["Location"],
        description: &["Description"],
        institution: &["School Name", "School"],
        degree: &["Degree Name", "Degree"],
        field_of_study: &["Field Of Study", "Notes"],
        education_start: &["Start Date", "Started On"],
        education_end: &["End Date", "Finished On"],
    },
    date_formats: &[
        DateFormat::IsoMonth,
        DateFormat::YearOnly,
        DateFormat::SlashMonthYear,
        DateFormat::MonthAbbrevYear,
    ],
    present_sentinels: &["present"],
    warnings: SectionWarnings {
        profile: "LinkedIn-Export: Profile.csv fehlt oder ist leer, persönliche Daten wurden nicht übernommen.",
        experience: "LinkedIn-Export: Positions.csv fehlt oder ist leer, es wurde keine Berufserfahrung übernommen.",
        education: "LinkedIn-Export: Education.csv fehlt oder ist leer, es wurde keine Ausbildung übernommen.",
    },
};

pub static XING: ProviderProfile = ProviderProfile {
    name: "XING",
    profile_sections: &["profil", "persönliche daten"],
    experience_sections: &["berufserfahrung", "werdegang"],
    education_sections: &["ausbildung", "bildung"],
    columns: ColumnAliases {
        first_name: &["Vorname"],
        last_name: &["Nachname"],
        email: &["E-Mail", "E-Mail-Adresse", "Email"],
        phone: &["Telefon", "Telefonnummer", "Mobil"],
        city: &["Wohnort", "Stadt", "Ort"],
        company: &["Unternehmen", "Firma", "Arbeitgeber"],
        position: &["Position", "Titel", "Jobtitel"],
        start_date: &["Von", "Beginn", "Startdatum"],
        end_date: &["Bis", "Ende", "Enddatum"],
        location: &["Ort", "Standort"],
        description: &["Beschreibung", "Tätigkeiten"],
        institution: &["Hochschule", "Schule", "Bildungseinrichtung"],
        degree: &["Abschluss"],
        field_of_study: &["Fachrichtung", "Studienfach", "Schwerpunkt"],
        education_start: &["Von", "Beginn"],
        education_end: &["Bis", "Ende"],
    },
    date_formats: &[
        DateFormat::IsoMonth,
        DateFormat::YearOnly,
        DateFormat::SlashMonthYear,
        DateFormat::DotMonthYear,
    ],
    present_sentinels: &["heute", "bis heute", "aktuell"],
    warnings: SectionWarnings {
        profile: "XING-Export: Profil fehlt oder ist leer, persönliche Daten wurden nicht übernommen.",
        experience: "XING-Export: Berufserfahrung fehlt oder ist leer, es wurde keine Berufserfahrung übernommen.",
        education: "XING-Export: Ausbildung fehlt oder ist leer, es wurde keine Ausbildung übernommen.",
    },
};
