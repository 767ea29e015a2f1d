//! Provider-independent content statistics

use crate::text;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Average adult reading speed used for time estimates
const WORDS_PER_MINUTE: usize = 200;

const KEY_TOPIC_COUNT: usize = 5;

/// Content types in detection order; the first match wins
const CONTENT_TYPES: &[(&str, &[&str])] = &[
    ("Financial Document", &["invoice", "bill", "payment", "financial"]),
    ("Report", &["report", "analysis", "study"]),
    ("Meeting Document", &["meeting", "agenda", "minutes"]),
    ("Legal Document", &["contract", "agreement", "legal"]),
    ("Technical Document", &["code", "programming", "software"]),
    ("Communication", &["email", "message", "correspondence"]),
];

const GENERAL_DOCUMENT: &str = "General Document";

/// Basic statistics about a document's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub word_count: usize,
    pub character_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub reading_minutes: usize,
    pub content_type: String,
    pub key_topics: Vec<String>,
}

impl DocumentAnalysis {
    pub fn analyze(content: &str) -> Self {
        let word_count = content.split_whitespace().count();

        Self {
            word_count,
            character_count: content.chars().count(),
            sentence_count: text::split_sentences(content).len(),
            paragraph_count: content
                .split("\n\n")
                .filter(|p| !p.trim().is_empty())
                .count(),
            reading_minutes: word_count.div_ceil(WORDS_PER_MINUTE),
            content_type: detect_content_type(content).to_string(),
            key_topics: key_topics(content),
        }
    }
}

fn detect_content_type(content: &str) -> &'static str {
    let stems: Vec<String> = text::words(content)
        .map(|w| text::stem(&w).to_string())
        .collect();

    CONTENT_TYPES
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|k| stems.iter().any(|s| s == text::stem(k)))
        })
        .map_or(GENERAL_DOCUMENT, |(name, _)| name)
}

/// Most frequent content words, ties in order of first appearance
fn key_topics(content: &str) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

    for (position, word) in text::words(content).enumerate() {
        if word.chars().count() <= 3 || text::is_stop_word(&word) {
            continue;
        }
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(KEY_TOPIC_COUNT)
        .map(|(word, _, _)| word)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let text = "Quarterly budget report. Revenue grew.\n\nCosts fell! Next steps?";
        let analysis = DocumentAnalysis::analyze(text);

        assert_eq!(analysis.word_count, 9);
        assert_eq!(analysis.sentence_count, 4);
        assert_eq!(analysis.paragraph_count, 2);
        assert_eq!(analysis.reading_minutes, 1);
        assert_eq!(analysis.character_count, text.chars().count());
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let text = "word ".repeat(401);
        assert_eq!(DocumentAnalysis::analyze(&text).reading_minutes, 3);
        assert_eq!(DocumentAnalysis::analyze("").reading_minutes, 0);
    }

    #[test]
    fn test_content_type_detection_order() {
        assert_eq!(
            detect_content_type("Invoice attached for the quarterly report"),
            "Financial Document"
        );
        assert_eq!(
            detect_content_type("Agenda and minutes from Monday"),
            "Meeting Document"
        );
        assert_eq!(
            detect_content_type("The software release notes"),
            "Technical Document"
        );
        assert_eq!(detect_content_type("A walk in the park"), GENERAL_DOCUMENT);
    }

    #[test]
    fn test_content_type_whole_words() {
        // "billion" must not count as "bill"
        assert_eq!(detect_content_type("Two billion stars"), GENERAL_DOCUMENT);
        assert_eq!(detect_content_type("Signed contracts"), "Legal Document");
    }

    #[test]
    fn test_key_topics() {
        let text = "Search search search. Storage storage. Auth features and the features.";
        let topics = DocumentAnalysis::analyze(text).key_topics;
        assert_eq!(topics, vec!["search", "storage", "features", "auth"]);
    }

    #[test]
    fn test_key_topics_capped() {
        let text = "alpha bravo charlie delta echo foxtrot golf";
        let topics = DocumentAnalysis::analyze(text).key_topics;
        assert_eq!(topics, vec!["alpha", "bravo", "charlie", "delta", "echo"]);
    }
}
