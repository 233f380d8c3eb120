//! Analysis module.
//!
//! Quality checks on imported application data:
//! - Keywords: job-description keyword coverage
//! - Tonality: clichés, passive phrasing and action verbs
//! - ATS: applicant-tracking compliance checklist

pub mod ats;
pub mod keywords;
pub mod tonality;

pub use ats::{check_ats, AtsCheck, AtsReport};
pub use keywords::{extract_keywords, match_keywords, KeywordEntry, KeywordMatchReport};
pub use tonality::{analyze_tonality, PhraseHit, Tone, TonalityReport};
