//! Timeline module.
//!
//! - Gaps: employment gap detection with an injectable clock
//! - Format: German duration and month labels

pub mod format;
pub mod gaps;

pub use format::{format_date_range, format_duration, format_month_label};
pub use gaps::{
    detect_gaps, detect_gaps_in, detect_gaps_with_threshold, Clock, FixedClock, SystemClock,
};
