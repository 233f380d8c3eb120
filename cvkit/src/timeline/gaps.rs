//! Employment gap detection.
//!
//! Intervals are ordered newest first and each adjacent pair is compared:
//! when the older interval ends more than the threshold before the newer one
//! starts, a [`GapRecord`] is emitted. Only adjacent pairs are compared, so
//! overlapping or back-to-back positions never produce a gap.
//!
//! Open-ended ("current") intervals end at the month supplied by a [`Clock`];
//! tests pin it with [`FixedClock`].

use std::cmp::Ordering;

use crate::config::GAP_THRESHOLD_MONTHS;
use crate::models::{ApplicationData, GapRecord, WorkInterval, YearMonth};

// =============================================================================
// Clock
// =============================================================================

/// Source of the current month.
pub trait Clock {
    fn current_month(&self) -> YearMonth;
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_month(&self) -> YearMonth {
        YearMonth::from_date(&chrono::Local::now().date_naive())
    }
}

/// Always returns the same month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub YearMonth);

impl Clock for FixedClock {
    fn current_month(&self) -> YearMonth {
        self.0
    }
}

// =============================================================================
// Detection
// =============================================================================

/// An interval with both ends resolved.
struct Span<'a> {
    id: &'a str,
    start: YearMonth,
    end: YearMonth,
}

/// Detect gaps longer than [`GAP_THRESHOLD_MONTHS`].
pub fn detect_gaps(intervals: &[WorkInterval], clock: &dyn Clock) -> Vec<GapRecord> {
    detect_gaps_with_threshold(intervals, clock, GAP_THRESHOLD_MONTHS)
}

/// Detect gaps strictly longer than `threshold` months.
///
/// Intervals without a parseable `YYYY-MM` start are ignored, as are
/// intervals whose end is present but not `YYYY-MM`. A missing end counts
/// as ongoing.
pub fn detect_gaps_with_threshold(
    intervals: &[WorkInterval],
    clock: &dyn Clock,
    threshold: u32,
) -> Vec<GapRecord> {
    if intervals.len() < 2 {
        return Vec::new();
    }

    let mut spans: Vec<Span<'_>> = intervals
        .iter()
        .filter_map(|interval| resolve(interval, clock))
        .collect();

    spans.sort_by(newest_first);

    spans
        .windows(2)
        .filter_map(|pair| {
            let (newer, older) = (&pair[0], &pair[1]);
            let months = older.end.months_until(newer.start);
            if i64::from(months) <= i64::from(threshold) {
                return None;
            }
            Some(GapRecord {
                after_position_id: newer.id.to_string(),
                before_position_id: older.id.to_string(),
                start_date: older.end.add_months(1).to_string(),
                end_date: newer.start.add_months(-1).to_string(),
                months: months as u32,
            })
        })
        .collect()
}

/// Gaps in the work history of imported data.
pub fn detect_gaps_in(data: &ApplicationData, clock: &dyn Clock) -> Vec<GapRecord> {
    detect_gaps(&data.work_intervals(), clock)
}

fn resolve<'a>(interval: &'a WorkInterval, clock: &dyn Clock) -> Option<Span<'a>> {
    let start = YearMonth::parse(&interval.start_date)?;
    let end = match interval.end_date.as_deref() {
        _ if interval.current => clock.current_month(),
        None => clock.current_month(),
        Some(end) => YearMonth::parse(end)?,
    };
    Some(Span {
        id: &interval.id,
        start,
        end,
    })
}

/// Start descending, then end descending, then id ascending.
fn newest_first(a: &Span<'_>, b: &Span<'_>) -> Ordering {
    b.start
        .cmp(&a.start)
        .then_with(|| b.end.cmp(&a.end))
        .then_with(|| a.id.cmp(b.id))
}
