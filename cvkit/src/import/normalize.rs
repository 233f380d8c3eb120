//! Shared provider normalizer.
//!
//! Maps the raw section texts of one export into [`ApplicationData`]. The
//! provider only contributes its [`ProviderProfile`]; lookup, date
//! conversion and warning collection are the same for every provider.
//!
//! Missing sections are not errors: they produce empty data and one warning
//! each. Rows keep their input order.

use std::collections::HashMap;

use uuid::Uuid;

use super::dates::normalize_date;
use super::provider::{normalize_label, Provider, ProviderProfile};
use crate::models::{ApplicationData, Education, PersonalData, WorkExperience};
use crate::parser::{parse_delimited, Record};

/// Normalized data plus the warnings for sections that could not be used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOutcome {
    pub data: ApplicationData,
    pub warnings: Vec<String>,
}

/// Normalize the sections of one export.
///
/// `sections` maps section labels (e.g. `"Positions"` or `"Positions.csv"`)
/// to raw CSV text. Labels are matched case-insensitively.
pub fn normalize_sections(
    provider: Provider,
    sections: &HashMap<String, String>,
) -> ImportOutcome {
    let profile = provider.profile();
    let mut warnings = Vec::new();

    let personal_rows = section_records(sections, profile.profile_sections);
    let personal_data = match personal_rows.first() {
        Some(row) => personal_data(profile, row),
        None => {
            warnings.push(profile.warnings.profile.to_string());
            PersonalData::default()
        }
    };

    let work_rows = section_records(sections, profile.experience_sections);
    if work_rows.is_empty() {
        warnings.push(profile.warnings.experience.to_string());
    }
    let work_experience = work_rows.iter().map(|row| work_entry(profile, row)).collect();

    let education_rows = section_records(sections, profile.education_sections);
    if education_rows.is_empty() {
        warnings.push(profile.warnings.education.to_string());
    }
    let education = education_rows
        .iter()
        .map(|row| education_entry(profile, row))
        .collect();

    ImportOutcome {
        data: ApplicationData {
            personal_data,
            work_experience,
            education,
        },
        warnings,
    }
}

/// Records of the first section whose label matches an alias.
///
/// Aliases are tried in order; among labels matching the same alias the
/// lexicographically smallest wins, so the result does not depend on map order.
fn section_records(sections: &HashMap<String, String>, aliases: &[&str]) -> Vec<Record> {
    aliases
        .iter()
        .find_map(|alias| {
            sections
                .iter()
                .filter(|(label, _)| normalize_label(label) == *alias)
                .min_by(|a, b| a.0.cmp(b.0))
                .map(|(_, text)| text)
        })
        .map(|text| parse_delimited(text))
        .unwrap_or_default()
}

/// First non-empty value among the aliased columns.
fn column(record: &Record, aliases: &[&str]) -> String {
    aliases
        .iter()
        .filter_map(|alias| record.get_ignore_case(alias))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn personal_data(profile: &ProviderProfile, row: &Record) -> PersonalData {
    let c = &profile.columns;
    PersonalData {
        first_name: column(row, c.first_name),
        last_name: column(row, c.last_name),
        email: column(row, c.email),
        phone: column(row, c.phone),
        city: column(row, c.city),
    }
}

fn work_entry(profile: &ProviderProfile, row: &Record) -> WorkExperience {
    let c = &profile.columns;
    let raw_end = column(row, c.end_date);
    let current = profile.is_present(&raw_end);
    let description = column(row, c.description);

    WorkExperience {
        id: Uuid::new_v4().to_string(),
        company: column(row, c.company),
        position: column(row, c.position),
        start_date: normalize_date(&column(row, c.start_date), profile.date_formats),
        end_date: if current {
            String::new()
        } else {
            normalize_date(&raw_end, profile.date_formats)
        },
        current,
        location: column(row, c.location),
        tasks: if description.is_empty() {
            Vec::new()
        } else {
            vec![description]
        },
    }
}

fn education_entry(profile: &ProviderProfile, row: &Record) -> Education {
    let c = &profile.columns;
    Education {
        id: Uuid::new_v4().to_string(),
        institution: column(row, c.institution),
        degree: column(row, c.degree),
        field_of_study: column(row, c.field_of_study),
        start_date: normalize_date(&column(row, c.education_start), profile.date_formats),
        end_date: normalize_date(&column(row, c.education_end), profile.date_formats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    const LINKEDIN_PROFILE: &str = "First Name,Last Name,Headline,Geo Location\nAda,Lovelace,Engineer,London\n";
    const LINKEDIN_POSITIONS: &str = "Company Name,Title,Description,Location,Started On,Finished On\n\
        \"Analytical Engines, Ltd.\",Programmer,\"Wrote the first program\nfor Bernoulli numbers\",London,Jun 2024,\n\
        Babbage & Co,Assistant,,Cambridge,Jan 2022,Jan 2024\n";
    const LINKEDIN_EDUCATION: &str = "School Name,Start Date,End Date,Notes,Degree Name\nUniversity of London,2015,2019,Mathematics,BSc\n";

    #[test]
    fn test_linkedin_full_export() {
        let outcome = normalize_sections(
            Provider::LinkedIn,
            &sections(&[
                ("Profile", LINKEDIN_PROFILE),
                ("Positions", LINKEDIN_POSITIONS),
                ("Education", LINKEDIN_EDUCATION),
            ]),
        );

        assert!(outcome.warnings.is_empty());

        let personal = &outcome.data.personal_data;
        assert_eq!(personal.first_name, "Ada");
        assert_eq!(personal.last_name, "Lovelace");
        assert_eq!(personal.city, "London");
        assert_eq!(personal.email, "");

        let jobs = &outcome.data.work_experience;
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].company, "Analytical Engines, Ltd.");
        assert_eq!(jobs[0].position, "Programmer");
        assert_eq!(jobs[0].start_date, "2024-06");
        assert_eq!(jobs[0].end_date, "");
        assert!(jobs[0].current);
        assert_eq!(
            jobs[0].tasks,
            vec!["Wrote the first program\nfor Bernoulli numbers".to_string()]
        );

        assert_eq!(jobs[1].start_date, "2022-01");
        assert_eq!(jobs[1].end_date, "2024-01");
        assert!(!jobs[1].current);
        assert!(jobs[1].tasks.is_empty());

        let edu = &outcome.data.education;
        assert_eq!(edu.len(), 1);
        assert_eq!(edu[0].institution, "University of London");
        assert_eq!(edu[0].degree, "BSc");
        assert_eq!(edu[0].field_of_study, "Mathematics");
        assert_eq!(edu[0].start_date, "2015-01");
        assert_eq!(edu[0].end_date, "2019-01");
    }

    #[test]
    fn test_ids_are_unique() {
        let outcome = normalize_sections(
            Provider::LinkedIn,
            &sections(&[("Positions", LINKEDIN_POSITIONS)]),
        );
        let jobs = &outcome.data.work_experience;
        assert_ne!(jobs[0].id, jobs[1].id);
        assert!(Uuid::parse_str(&jobs[0].id).is_ok());
    }

    #[test]
    fn test_missing_sections_warn() {
        let outcome = normalize_sections(Provider::LinkedIn, &HashMap::new());

        assert_eq!(outcome.data, ApplicationData::default());
        assert_eq!(
            outcome.warnings,
            vec![
                crate::import::provider::LINKEDIN.warnings.profile.to_string(),
                crate::import::provider::LINKEDIN.warnings.experience.to_string(),
                crate::import::provider::LINKEDIN.warnings.education.to_string(),
            ]
        );
    }

    #[test]
    fn test_header_only_section_counts_as_missing() {
        let outcome = normalize_sections(
            Provider::LinkedIn,
            &sections(&[
                ("Profile", "First Name,Last Name\n"),
                ("Positions", LINKEDIN_POSITIONS),
                ("Education", LINKEDIN_EDUCATION),
            ]),
        );
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("Profile.csv"));
        assert_eq!(outcome.data.personal_data, PersonalData::default());
    }

    #[test]
    fn test_section_labels_case_insensitive() {
        let outcome = normalize_sections(
            Provider::LinkedIn,
            &sections(&[("POSITIONS.csv", LINKEDIN_POSITIONS), ("profile", LINKEDIN_PROFILE)]),
        );
        assert_eq!(outcome.data.work_experience.len(), 2);
        assert_eq!(outcome.data.personal_data.first_name, "Ada");
    }

    #[test]
    fn test_xing_export() {
        let outcome = normalize_sections(
            Provider::Xing,
            &sections(&[
                ("Profil", "Vorname,Nachname,E-Mail,Telefon,Wohnort\nErika,Mustermann,erika@example.de,+49 30 123456,Berlin\n"),
                (
                    "Berufserfahrung",
                    "Unternehmen,Position,Von,Bis,Ort,Beschreibung\n\
                     Muster GmbH,Entwicklerin,03.2021,heute,Berlin,Backend-Entwicklung\n\
                     Beispiel AG,Werkstudentin,10.2018,2/2021,München,\n",
                ),
                ("Ausbildung", "Hochschule,Abschluss,Fachrichtung,Von,Bis\nTU Berlin,M.Sc.,Informatik,10.2016,09.2018\n"),
            ]),
        );

        assert!(outcome.warnings.is_empty());
        let p = &outcome.data.personal_data;
        assert_eq!(p.email, "erika@example.de");
        assert_eq!(p.phone, "+49 30 123456");
        assert_eq!(p.city, "Berlin");

        let jobs = &outcome.data.work_experience;
        assert_eq!(jobs[0].start_date, "2021-03");
        assert!(jobs[0].current);
        assert_eq!(jobs[0].end_date, "");
        assert_eq!(jobs[0].tasks, vec!["Backend-Entwicklung".to_string()]);
        assert_eq!(jobs[1].start_date, "2018-10");
        assert_eq!(jobs[1].end_date, "2021-02");
        assert!(!jobs[1].current);

        let edu = &outcome.data.education[0];
        assert_eq!(edu.field_of_study, "Informatik");
        assert_eq!(edu.start_date, "2016-10");
        assert_eq!(edu.end_date, "2018-09");
    }

    #[test]
    fn test_xing_does_not_read_month_abbreviations() {
        let outcome = normalize_sections(
            Provider::Xing,
            &sections(&[("Berufserfahrung", "Unternehmen,Von,Bis\nA,Jan 2020,Feb 2021\n")]),
        );
        let job = &outcome.data.work_experience[0];
        assert_eq!(job.start_date, "Jan 2020");
        assert_eq!(job.end_date, "Feb 2021");
    }

    #[test]
    fn test_unrecognized_dates_pass_through() {
        let outcome = normalize_sections(
            Provider::LinkedIn,
            &sections(&[(
                "Positions",
                "Company Name,Started On,Finished On\nX,Spring 2019,Summer 2020\n",
            )]),
        );
        let job = &outcome.data.work_experience[0];
        assert_eq!(job.start_date, "Spring 2019");
        assert_eq!(job.end_date, "Summer 2020");
    }

    #[test]
    fn test_warnings_are_provider_specific() {
        let linkedin = normalize_sections(Provider::LinkedIn, &HashMap::new());
        let xing = normalize_sections(Provider::Xing, &HashMap::new());
        assert!(linkedin.warnings.iter().all(|w| w.starts_with("LinkedIn")));
        assert!(xing.warnings.iter().all(|w| w.starts_with("XING")));
    }
}
