//! German labels for durations and months.

use crate::models::YearMonth;

const MONTH_NAMES: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Label used for the end of an ongoing position.
pub const PRESENT_LABEL: &str = "heute";

/// Human readable duration, e.g. `14` → `"1 Jahr, 2 Monate"`.
pub fn format_duration(months: u32) -> String {
    if months < 12 {
        return month_count(months);
    }

    let years = months / 12;
    let rest = months % 12;
    let year_part = if years == 1 {
        "1 Jahr".to_string()
    } else {
        format!("{} Jahre", years)
    };

    if rest == 0 {
        year_part
    } else {
        format!("{}, {}", year_part, month_count(rest))
    }
}

fn month_count(months: u32) -> String {
    if months == 1 {
        "1 Monat".to_string()
    } else {
        format!("{} Monate", months)
    }
}

/// `"2024-03"` → `"März 2024"`. Anything that is not `YYYY-MM` is returned as is.
pub fn format_month_label(date: &str) -> String {
    match YearMonth::parse(date) {
        Some(ym) => format!("{} {}", MONTH_NAMES[ym.month() as usize - 1], ym.year()),
        None => date.to_string(),
    }
}

/// `"Januar 2020 – heute"`, `"Januar 2020 – Mai 2022"` or just the start label.
pub fn format_date_range(start: &str, end: &str, current: bool) -> String {
    let start = format_month_label(start.trim());
    let end = if current {
        PRESENT_LABEL.to_string()
    } else {
        format_month_label(end.trim())
    };

    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, true) => start,
        (true, false) => end,
        (false, false) => format!("{} – {}", start, end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0 Monate");
        assert_eq!(format_duration(1), "1 Monat");
        assert_eq!(format_duration(5), "5 Monate");
        assert_eq!(format_duration(11), "11 Monate");
        assert_eq!(format_duration(12), "1 Jahr");
        assert_eq!(format_duration(13), "1 Jahr, 1 Monat");
        assert_eq!(format_duration(14), "1 Jahr, 2 Monate");
        assert_eq!(format_duration(24), "2 Jahre");
        assert_eq!(format_duration(37), "3 Jahre, 1 Monat");
    }

    #[test]
    fn test_format_month_label() {
        assert_eq!(format_month_label("2024-01"), "Januar 2024");
        assert_eq!(format_month_label("2019-03"), "März 2019");
        assert_eq!(format_month_label("2020-12"), "Dezember 2020");
        assert_eq!(format_month_label("Jan 2020"), "Jan 2020");
        assert_eq!(format_month_label(""), "");
    }

    #[test]
    fn test_format_date_range() {
        assert_eq!(format_date_range("2020-01", "", true), "Januar 2020 – heute");
        assert_eq!(format_date_range("2020-01", "2022-05", false), "Januar 2020 – Mai 2022");
        assert_eq!(format_date_range("2020-01", "", false), "Januar 2020");
        assert_eq!(format_date_range("", "", false), "");
    }
}
