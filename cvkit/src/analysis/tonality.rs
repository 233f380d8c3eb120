//! Tonality analysis for résumé and cover-letter text.
//!
//! Counts clichés, passive constructions, weak qualifiers and action verbs
//! and folds them into a 0 - 100 score:
//!
//! | Hit           | Effect                     |
//! |---------------|----------------------------|
//! | cliché        | −8 per occurrence          |
//! | passive       | −6 per occurrence          |
//! | weak word     | −4 per occurrence          |
//! | action verb   | +3 per occurrence, max +15 |

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const CLICHE_PENALTY: i64 = 8;
const PASSIVE_PENALTY: i64 = 6;
const WEAK_PENALTY: i64 = 4;
const ACTION_BONUS: i64 = 3;
const ACTION_BONUS_CAP: i64 = 15;
const CONFIDENT_SCORE: u32 = 80;

const CLICHES: &[&str] = &[
    "teamfähig",
    "teamfähigkeit",
    "belastbar",
    "flexibel",
    "zuverlässig",
    "hochmotiviert",
    "kommunikationsstark",
    "lösungsorientiert",
    "zielstrebig",
    "über den tellerrand",
    "stets bemüht",
    "mit leidenschaft",
    "team player",
    "hard working",
    "think outside the box",
];

const PASSIVE_PHRASES: &[&str] = &[
    "war zuständig für",
    "war verantwortlich für",
    "wurde beauftragt",
    "wurde eingesetzt",
    "wurde übertragen",
    "wurden übertragen",
    "mitgewirkt bei",
    "unterstützung bei",
    "responsible for",
    "was tasked with",
    "was involved in",
];

const WEAK_WORDS: &[&str] = &[
    "eventuell",
    "vielleicht",
    "versucht",
    "einigermaßen",
    "gewisse",
    "ziemlich",
    "eigentlich",
    "irgendwie",
    "helped",
    "tried",
    "somewhat",
];

const ACTION_VERBS: &[&str] = &[
    "entwickelt",
    "geleitet",
    "eingeführt",
    "aufgebaut",
    "optimiert",
    "reduziert",
    "gesteigert",
    "umgesetzt",
    "verantwortet",
    "konzipiert",
    "implementiert",
    "automatisiert",
    "led",
    "built",
    "developed",
    "launched",
    "delivered",
];

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{L}+").expect("valid regex"));

/// One table entry found in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseHit {
    pub phrase: String,
    pub count: u32,
}

/// Overall impression of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Confident,
    Neutral,
    Passive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TonalityReport {
    pub cliches: Vec<PhraseHit>,
    pub passive_phrases: Vec<PhraseHit>,
    pub weak_words: Vec<PhraseHit>,
    pub action_verbs: Vec<PhraseHit>,
    /// 0 - 100
    pub score: u32,
    pub tone: Tone,
}

/// Analyze the tonality of `text`.
///
/// Matching is case-insensitive on whole words; multi-word phrases must
/// appear as consecutive words, punctuation in between is ignored.
pub fn analyze_tonality(text: &str) -> TonalityReport {
    let lower = text.to_lowercase();
    let words: Vec<&str> = WORD.find_iter(&lower).map(|m| m.as_str()).collect();

    let cliches = find_hits(&words, CLICHES);
    let passive_phrases = find_hits(&words, PASSIVE_PHRASES);
    let weak_words = find_hits(&words, WEAK_WORDS);
    let action_verbs = find_hits(&words, ACTION_VERBS);

    let cliche_count = total(&cliches);
    let passive_count = total(&passive_phrases);
    let weak_count = total(&weak_words);
    let action_count = total(&action_verbs);

    let raw = 100 - CLICHE_PENALTY * cliche_count - PASSIVE_PENALTY * passive_count
        - WEAK_PENALTY * weak_count
        + (ACTION_BONUS * action_count).min(ACTION_BONUS_CAP);
    let score = raw.clamp(0, 100) as u32;

    let tone = if score >= CONFIDENT_SCORE && action_count > 0 {
        Tone::Confident
    } else if passive_count > action_count {
        Tone::Passive
    } else {
        Tone::Neutral
    };

    TonalityReport {
        cliches,
        passive_phrases,
        weak_words,
        action_verbs,
        score,
        tone,
    }
}

/// Table entries with at least one occurrence, in table order.
fn find_hits(words: &[&str], table: &[&str]) -> Vec<PhraseHit> {
    table
        .iter()
        .filter_map(|phrase| {
            let count = count_phrase(words, phrase);
            (count > 0).then(|| PhraseHit {
                phrase: phrase.to_string(),
                count,
            })
        })
        .collect()
}

fn count_phrase(words: &[&str], phrase: &str) -> u32 {
    let parts: Vec<&str> = phrase.split_whitespace().collect();
    if parts.is_empty() || parts.len() > words.len() {
        return 0;
    }
    words
        .windows(parts.len())
        .filter(|window| *window == parts.as_slice())
        .count() as u32
}

fn total(hits: &[PhraseHit]) -> i64 {
    hits.iter().map(|h| h.count as i64).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let report = analyze_tonality("");
        assert_eq!(report.score, 100);
        assert_eq!(report.tone, Tone::Neutral);
        assert!(report.cliches.is_empty());
    }

    #[test]
    fn test_confident_text() {
        let text = "Ich habe das Team geleitet und einen neuen Review-Prozess eingeführt.";
        let report = analyze_tonality(text);
        assert_eq!(report.action_verbs.len(), 2);
        assert_eq!(report.score, 100);
        assert_eq!(report.tone, Tone::Confident);
    }

    #[test]
    fn test_passive_text() {
        let report = analyze_tonality(
            "Ich war zuständig für die Buchhaltung und wurde beauftragt, Berichte zu erstellen.",
        );
        assert_eq!(report.passive_phrases.len(), 2);
        assert_eq!(report.score, 88);
        assert_eq!(report.tone, Tone::Passive);
    }

    #[test]
    fn test_cliches_counted() {
        let report = analyze_tonality("Ich bin teamfähig, belastbar und flexibel. Sehr flexibel!");
        assert_eq!(
            report.cliches,
            vec![
                PhraseHit { phrase: "teamfähig".into(), count: 1 },
                PhraseHit { phrase: "belastbar".into(), count: 1 },
                PhraseHit { phrase: "flexibel".into(), count: 2 },
            ]
        );
        assert_eq!(total(&report.cliches), 4);
        assert_eq!(report.score, 68);
        assert_eq!(report.tone, Tone::Neutral);
    }

    #[test]
    fn test_whole_words_only() {
        let report = analyze_tonality("Unflexibel war gestern.");
        assert!(report.cliches.is_empty());
    }

    #[test]
    fn test_case_insensitive_phrases() {
        let report = analyze_tonality("RESPONSIBLE FOR the\nbudget. Tried hard.");
        assert_eq!(report.passive_phrases[0].phrase, "responsible for");
        assert_eq!(report.weak_words[0].phrase, "tried");
        assert_eq!(report.score, 90);
    }

    #[test]
    fn test_action_bonus_is_capped() {
        let text = "teamfähig belastbar flexibel zuverlässig zielstrebig \
                    entwickelt geleitet eingeführt aufgebaut optimiert reduziert";
        let report = analyze_tonality(text);
        // 100 - 5 * 8 + 15
        assert_eq!(report.score, 75);
        assert_eq!(report.tone, Tone::Neutral);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        let text = "vielleicht ".repeat(30);
        assert_eq!(analyze_tonality(&text).score, 0);
    }

    #[test]
    fn test_tone_serialization() {
        assert_eq!(serde_json::to_string(&Tone::Confident).unwrap(), "\"confident\"");
    }
}
