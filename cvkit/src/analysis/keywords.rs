//! Job-description keyword matching.
//!
//! Keywords are the most frequent meaningful tokens of a job ad. A résumé
//! covers a keyword when the same token appears anywhere in its text. The
//! score weights each keyword by its frequency in the ad:
//!
//! ```text
//! score = round(100 × Σ freq(matched) / Σ freq(all))
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A keyword from the job description with its frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub frequency: u32,
}

/// Coverage of job keywords by a résumé.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordMatchReport {
    /// 0 - 100
    pub score: u32,
    pub matched: Vec<KeywordEntry>,
    pub missing: Vec<KeywordEntry>,
    pub recommendation: String,
}

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}][\p{L}\p{N}+#.\-]*").expect("valid regex"));

/// Tokens shorter than three characters that still carry meaning.
const SHORT_TERMS: &[&str] = &[
    "go", "ai", "ki", "ux", "ui", "qa", "c#", "c++", "js", "ts", "bi", "it", "hr", "r", "ml", "db",
];

const STOP_WORDS: &[&str] = &[
    // German
    "und", "oder", "der", "die", "das", "den", "dem", "des", "ein", "eine", "einer", "eines",
    "einem", "einen", "mit", "für", "von", "bei", "auf", "aus", "als", "auch", "sich", "sie",
    "wir", "ihr", "ihre", "ihren", "ihrer", "uns", "unser", "unsere", "unseren", "unserem",
    "sind", "ist", "wird", "werden", "haben", "hast", "hat", "bist", "kannst", "kann", "sowie",
    "nach", "über", "unter", "durch", "zum", "zur", "im", "in", "am", "an", "zu", "du", "dich",
    "dir", "dein", "deine", "deiner", "deinen", "nicht", "noch", "sehr", "gute", "guten",
    "gutes", "erste", "ersten", "mehr", "alle", "jahre", "jahren", "bieten", "suchen", "wie",
    "was", "wer", "wenn", "dass", "damit", "diese", "dieser", "dieses", "m/w/d", "w/m/d",
    // English
    "and", "the", "for", "with", "you", "your", "our", "are", "will", "have", "has", "from",
    "this", "that", "who", "what", "all", "any", "can", "into", "about", "more", "years",
    "year", "experience", "team", "work", "working", "strong", "plus", "etc", "not", "but",
];

/// Lowercased tokens of `text`, trailing punctuation removed.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    TOKEN.find_iter(text).filter_map(|m| {
        let token = m.as_str().trim_end_matches(['.', '-']).to_lowercase();
        (!token.is_empty()).then_some(token)
    })
}

fn is_keyword(token: &str) -> bool {
    if STOP_WORDS.contains(&token) {
        return false;
    }
    if token.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    token.chars().count() >= 3 || SHORT_TERMS.contains(&token)
}

/// The `limit` most frequent keywords of `text`.
///
/// Ordered by frequency descending, then alphabetically.
pub fn extract_keywords(text: &str, limit: usize) -> Vec<KeywordEntry> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for token in tokenize(text).filter(|t| is_keyword(t)) {
        *counts.entry(token).or_default() += 1;
    }

    let mut entries: Vec<KeywordEntry> = counts
        .into_iter()
        .map(|(keyword, frequency)| KeywordEntry { keyword, frequency })
        .collect();
    entries.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.keyword.cmp(&b.keyword)));
    entries.truncate(limit);
    entries
}

/// Match a résumé text against the keywords of a job description.
pub fn match_keywords(job_text: &str, cv_text: &str, limit: usize) -> KeywordMatchReport {
    let keywords = extract_keywords(job_text, limit);
    let cv_tokens: HashSet<String> = tokenize(cv_text).collect();

    let (matched, missing): (Vec<_>, Vec<_>) = keywords
        .into_iter()
        .partition(|k| cv_tokens.contains(&k.keyword));

    let total: u32 = matched.iter().chain(&missing).map(|k| k.frequency).sum();
    let covered: u32 = matched.iter().map(|k| k.frequency).sum();
    let score = if total > 0 {
        ((covered as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };

    let recommendation = build_recommendation(score, total, &missing);

    KeywordMatchReport {
        score,
        matched,
        missing,
        recommendation,
    }
}

fn build_recommendation(score: u32, total: u32, missing: &[KeywordEntry]) -> String {
    let top: Vec<&str> = missing.iter().take(5).map(|k| k.keyword.as_str()).collect();

    if total == 0 {
        "Keine Schlüsselwörter in der Stellenanzeige gefunden.".to_string()
    } else if score >= 80 {
        "Sehr gute Übereinstimmung mit der Stellenanzeige.".to_string()
    } else if score >= 50 {
        format!(
            "Solide Übereinstimmung ({score}/100). Ergänze nach Möglichkeit: {}.",
            top.join(", ")
        )
    } else {
        format!("Geringe Übereinstimmung ({score}/100). Es fehlen: {}.", top.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB_AD: &str = "
        Backend-Entwickler (m/w/d) Rust
        Du entwickelst Microservices in Rust und Go. Erfahrung mit PostgreSQL und Kubernetes.
        Rust-Kenntnisse sind Pflicht, Kubernetes ist ein Plus. Wir arbeiten mit PostgreSQL.
        Rust, Rust, CI/CD.
    ";

    #[test]
    fn test_extract_orders_by_frequency() {
        let keywords = extract_keywords(JOB_AD, 5);
        assert_eq!(keywords[0].keyword, "rust");
        // "Rust-Kenntnisse" is its own token
        assert_eq!(keywords[0].frequency, 4);
        assert_eq!(keywords[1].keyword, "kubernetes");
        assert_eq!(keywords[2].keyword, "postgresql");
        assert_eq!(keywords.len(), 5);
    }

    #[test]
    fn test_stop_words_and_short_tokens_dropped() {
        let keywords = extract_keywords("Wir und die Firma mit AI und Go in 2024", 10);
        let words: Vec<&str> = keywords.iter().map(|k| k.keyword.as_str()).collect();
        assert!(words.contains(&"firma"));
        assert!(words.contains(&"ai"));
        assert!(words.contains(&"go"));
        assert!(!words.contains(&"und"));
        assert!(!words.contains(&"in"));
        assert!(!words.contains(&"2024"));
    }

    #[test]
    fn test_special_tokens_survive() {
        let keywords = extract_keywords("C++ and C# with Node.js.", 10);
        let words: Vec<&str> = keywords.iter().map(|k| k.keyword.as_str()).collect();
        assert!(words.contains(&"c++"));
        assert!(words.contains(&"c#"));
        assert!(words.contains(&"node.js"));
    }

    #[test]
    fn test_match_score() {
        // rust ×2, kafka ×1, docker ×1
        let report = match_keywords("Rust Rust Kafka Docker", "Ich schreibe Rust und Docker.", 10);
        assert_eq!(report.score, 75);
        assert_eq!(report.matched.len(), 2);
        assert_eq!(report.missing, vec![KeywordEntry { keyword: "kafka".into(), frequency: 1 }]);
        assert!(report.recommendation.contains("kafka"));
    }

    #[test]
    fn test_full_and_empty_match() {
        assert_eq!(match_keywords("Rust Kafka", "rust, KAFKA", 10).score, 100);
        assert_eq!(match_keywords("Rust Kafka", "", 10).score, 0);

        let empty = match_keywords("und die der", "Rust", 10);
        assert_eq!(empty.score, 0);
        assert!(empty.matched.is_empty() && empty.missing.is_empty());
    }

    #[test]
    fn test_whole_token_match_only() {
        let report = match_keywords("Java", "JavaScript", 10);
        assert_eq!(report.score, 0);
    }
}
