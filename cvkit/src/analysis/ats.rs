//! ATS compliance checklist.
//!
//! Applicant tracking systems reject résumés that miss contact data, use
//! free-form dates or leave unexplained gaps. Each check has a weight; the
//! score is the passed share of the total weight.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{ApplicationData, YearMonth};
use crate::timeline::{detect_gaps_with_threshold, format_duration, Clock};

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]{2,}$").expect("valid regex"));

const MIN_PHONE_DIGITS: usize = 6;

/// Result of one checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsCheck {
    pub id: String,
    pub passed: bool,
    pub weight: u32,
    /// Hint for failed checks, empty otherwise
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsReport {
    /// 0 - 100
    pub score: u32,
    pub checks: Vec<AtsCheck>,
}

impl AtsReport {
    pub fn failed(&self) -> impl Iterator<Item = &AtsCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

/// Run the checklist against imported data.
///
/// Gaps longer than `gap_threshold` months fail the `gaps` check.
pub fn check_ats(data: &ApplicationData, clock: &dyn Clock, gap_threshold: u32) -> AtsReport {
    let personal = &data.personal_data;

    let gaps = detect_gaps_with_threshold(&data.work_intervals(), clock, gap_threshold);
    let gap_hint = match gaps.first() {
        Some(gap) => format!(
            "{} Lücke(n) im Lebenslauf, z.B. {} bis {} ({}). \
             Erkläre Lücken kurz im Anschreiben oder Lebenslauf.",
            gaps.len(),
            gap.start_date,
            gap.end_date,
            format_duration(gap.months)
        ),
        None => String::new(),
    };

    let checks = vec![
        check(
            "name",
            10,
            !personal.first_name.trim().is_empty() && !personal.last_name.trim().is_empty(),
            "Vor- und Nachname fehlen oder sind unvollständig.",
        ),
        check(
            "email",
            15,
            EMAIL.is_match(personal.email.trim()),
            "Keine gültige E-Mail-Adresse angegeben.",
        ),
        check(
            "phone",
            10,
            personal.phone.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS,
            "Keine Telefonnummer angegeben.",
        ),
        check(
            "experience",
            20,
            !data.work_experience.is_empty(),
            "Keine Berufserfahrung angegeben.",
        ),
        check(
            "dates",
            15,
            dates_are_canonical(data),
            "Nicht alle Datumsangaben haben das Format JJJJ-MM.",
        ),
        check(
            "tasks",
            10,
            data.work_experience.iter().all(|job| !job.tasks.is_empty()),
            "Nicht jede Position enthält eine Tätigkeitsbeschreibung.",
        ),
        check(
            "education",
            10,
            !data.education.is_empty(),
            "Keine Ausbildung angegeben.",
        ),
        check("gaps", 10, gaps.is_empty(), &gap_hint),
    ];

    let total: u32 = checks.iter().map(|c| c.weight).sum();
    let passed: u32 = checks.iter().filter(|c| c.passed).map(|c| c.weight).sum();
    let score = ((passed as f64 / total as f64) * 100.0).round() as u32;

    AtsReport { score, checks }
}

fn check(id: &str, weight: u32, passed: bool, hint: &str) -> AtsCheck {
    AtsCheck {
        id: id.to_string(),
        passed,
        weight,
        message: if passed { String::new() } else { hint.to_string() },
    }
}

fn is_canonical(date: &str) -> bool {
    YearMonth::parse(date).is_some()
}

fn dates_are_canonical(data: &ApplicationData) -> bool {
    let work_ok = data.work_experience.iter().all(|job| {
        let end_ok = if job.current {
            job.end_date.trim().is_empty() || is_canonical(&job.end_date)
        } else {
            is_canonical(&job.end_date)
        };
        is_canonical(&job.start_date) && end_ok
    });
    let education_ok = data
        .education
        .iter()
        .all(|edu| is_canonical(&edu.start_date) && is_canonical(&edu.end_date));
    work_ok && education_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GAP_THRESHOLD_MONTHS;
    use crate::models::{Education, PersonalData, WorkExperience};
    use crate::timeline::FixedClock;

    fn clock() -> FixedClock {
        FixedClock(YearMonth::new(2024, 12).unwrap())
    }

    fn job(id: &str, start: &str, end: &str, current: bool) -> WorkExperience {
        WorkExperience {
            id: id.to_string(),
            company: "Muster GmbH".to_string(),
            position: "Entwicklerin".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            current,
            tasks: vec!["Backend-Services entwickelt".to_string()],
            ..Default::default()
        }
    }

    fn complete() -> ApplicationData {
        ApplicationData {
            personal_data: PersonalData {
                first_name: "Erika".to_string(),
                last_name: "Mustermann".to_string(),
                email: "erika@example.de".to_string(),
                phone: "+49 30 123456".to_string(),
                city: "Berlin".to_string(),
            },
            work_experience: vec![
                job("a", "2022-01", "", true),
                job("b", "2019-01", "2021-12", false),
            ],
            education: vec![Education {
                id: "e".to_string(),
                institution: "TU Berlin".to_string(),
                degree: "M.Sc.".to_string(),
                field_of_study: "Informatik".to_string(),
                start_date: "2016-10".to_string(),
                end_date: "2018-09".to_string(),
            }],
        }
    }

    #[test]
    fn test_complete_data_scores_full() {
        let report = check_ats(&complete(), &clock(), GAP_THRESHOLD_MONTHS);
        assert_eq!(report.score, 100);
        assert_eq!(report.checks.len(), 8);
        assert_eq!(report.failed().count(), 0);
        assert!(report.checks.iter().all(|c| c.message.is_empty()));
        assert_eq!(report.checks.iter().map(|c| c.weight).sum::<u32>(), 100);
    }

    #[test]
    fn test_empty_data() {
        let report = check_ats(&ApplicationData::default(), &clock(), GAP_THRESHOLD_MONTHS);
        let failed: Vec<&str> = report.failed().map(|c| c.id.as_str()).collect();
        assert_eq!(failed, vec!["name", "email", "phone", "experience", "education"]);
        // dates, tasks and gaps pass vacuously
        assert_eq!(report.score, 35);
    }

    #[test]
    fn test_invalid_email() {
        let mut data = complete();
        data.personal_data.email = "erika at example".to_string();
        let report = check_ats(&data, &clock(), GAP_THRESHOLD_MONTHS);
        assert_eq!(report.score, 85);
        let email = report.checks.iter().find(|c| c.id == "email").unwrap();
        assert!(!email.passed);
        assert!(email.message.contains("E-Mail"));
    }

    #[test]
    fn test_raw_dates_fail() {
        let mut data = complete();
        data.work_experience[1].start_date = "Spring 2019".to_string();
        let report = check_ats(&data, &clock(), GAP_THRESHOLD_MONTHS);
        let dates = report.checks.iter().find(|c| c.id == "dates").unwrap();
        assert!(!dates.passed);
    }

    #[test]
    fn test_finished_job_needs_end() {
        let mut data = complete();
        data.work_experience[1].end_date = String::new();
        let report = check_ats(&data, &clock(), GAP_THRESHOLD_MONTHS);
        assert!(report.failed().any(|c| c.id == "dates"));
    }

    #[test]
    fn test_missing_tasks() {
        let mut data = complete();
        data.work_experience[0].tasks.clear();
        let report = check_ats(&data, &clock(), GAP_THRESHOLD_MONTHS);
        assert_eq!(report.failed().map(|c| c.id.as_str()).collect::<Vec<_>>(), vec!["tasks"]);
        assert_eq!(report.score, 90);
    }

    #[test]
    fn test_gap_reported() {
        let mut data = complete();
        data.work_experience[0].start_date = "2022-06".to_string();
        let report = check_ats(&data, &clock(), GAP_THRESHOLD_MONTHS);
        let gaps = report.checks.iter().find(|c| c.id == "gaps").unwrap();
        assert!(!gaps.passed);
        assert!(gaps.message.contains("2022-01 bis 2022-05"));
        assert!(gaps.message.contains("6 Monate"));
    }

    #[test]
    fn test_gap_threshold_is_configurable() {
        let mut data = complete();
        // 2021-12 → 2022-04: four months
        data.work_experience[0].start_date = "2022-04".to_string();

        let strict = check_ats(&data, &clock(), GAP_THRESHOLD_MONTHS);
        assert!(strict.failed().any(|c| c.id == "gaps"));

        let relaxed = check_ats(&data, &clock(), 6);
        assert_eq!(relaxed.failed().count(), 0);
        assert_eq!(relaxed.score, 100);
    }
}
