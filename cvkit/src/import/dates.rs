//! Provider date tokens to `YYYY-MM`.
//!
//! Each provider enables the subset of [`DateFormat`]s it actually emits.
//! Formats are always tried in the fixed priority order of the enum;
//! unrecognized tokens come back unchanged (trimmed), so callers must
//! tolerate non-canonical strings.

use once_cell::sync::Lazy;
use regex::Regex;

/// Recognized date shapes, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DateFormat {
    /// `2020-03`
    IsoMonth,
    /// `2020` → `2020-01`
    YearOnly,
    /// `3/2020` or `03/2020`
    SlashMonthYear,
    /// `3.2020` or `03.2020`
    DotMonthYear,
    /// `Mar 2020`
    MonthAbbrevYear,
}

impl DateFormat {
    pub const ALL: [DateFormat; 5] = [
        DateFormat::IsoMonth,
        DateFormat::YearOnly,
        DateFormat::SlashMonthYear,
        DateFormat::DotMonthYear,
        DateFormat::MonthAbbrevYear,
    ];
}

static ISO_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("valid regex"));
static YEAR_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("valid regex"));
static SLASH_MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{4})$").expect("valid regex"));
static DOT_MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\.(\d{4})$").expect("valid regex"));
static MONTH_ABBREV_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]{3}) (\d{4})$").expect("valid regex"));

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Normalize a date token with every known format.
pub fn normalize_date_token(raw: &str) -> String {
    normalize_date(raw, &DateFormat::ALL)
}

/// Normalize a date token with the given formats.
///
/// ```
/// use cvkit::import::dates::{normalize_date, DateFormat};
///
/// assert_eq!(normalize_date("03.2019", &[DateFormat::DotMonthYear]), "2019-03");
/// assert_eq!(normalize_date("03.2019", &[DateFormat::SlashMonthYear]), "03.2019");
/// ```
pub fn normalize_date(raw: &str, formats: &[DateFormat]) -> String {
    let token = raw.trim();

    let mut ordered = formats.to_vec();
    ordered.sort();
    ordered.dedup();

    ordered
        .into_iter()
        .find_map(|format| apply(format, token))
        .unwrap_or_else(|| token.to_string())
}

fn apply(format: DateFormat, token: &str) -> Option<String> {
    match format {
        DateFormat::IsoMonth => ISO_MONTH.is_match(token).then(|| token.to_string()),
        DateFormat::YearOnly => YEAR_ONLY.is_match(token).then(|| format!("{}-01", token)),
        DateFormat::SlashMonthYear => month_year(&SLASH_MONTH_YEAR, token),
        DateFormat::DotMonthYear => month_year(&DOT_MONTH_YEAR, token),
        DateFormat::MonthAbbrevYear => {
            let caps = MONTH_ABBREV_YEAR.captures(token)?;
            let abbrev = caps[1].to_lowercase();
            let index = MONTH_ABBREVIATIONS.iter().position(|m| *m == abbrev)?;
            Some(format!("{}-{:02}", &caps[2], index + 1))
        }
    }
}

/// Month then year, month validated and zero-padded.
fn month_year(pattern: &Regex, token: &str) -> Option<String> {
    let caps = pattern.captures(token)?;
    let month: u32 = caps[1].parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some(format!("{}-{:02}", &caps[2], month))
}
