//! Text heuristics shared by the local provider, normalizer and analysis

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"[\p{L}\p{N}][\p{L}\p{N}'_-]*").unwrap();
    static ref STOP_WORDS: HashSet<&'static str> = [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did",
        "will", "would", "could", "should", "may", "might", "can", "this", "that", "these",
        "those", "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
        "what", "who", "whom", "when", "where", "which", "why", "how", "its", "our", "your",
        "their", "from", "into", "about", "there", "any", "some", "not", "no", "so", "if",
        "then", "than", "also", "as", "all",
    ]
    .into_iter()
    .collect();
}

/// Split text into trimmed sentences.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace (or end of
/// text), or at a blank line.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let boundary = match ch {
            '.' | '!' | '?' => chars.peek().map_or(true, |(_, next)| next.is_whitespace()),
            '\n' => chars.peek().is_some_and(|(_, next)| *next == '\n'),
            _ => false,
        };

        if boundary {
            let end = idx + ch.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

/// Lower-cased word tokens
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD_RE.find_iter(text).map(|m| m.as_str().to_lowercase())
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Content words: tokens that are not stop words and longer than two chars
pub fn keywords(text: &str) -> impl Iterator<Item = String> + '_ {
    words(text).filter(|w| w.chars().count() > 2 && !is_stop_word(w))
}

/// Crude suffix stripping so "shipped" and "shipping" meet at "shipp"
pub fn stem(word: &str) -> &str {
    for suffix in ["ing", "ed", "es", "s"] {
        if let Some(stripped) = word.strip_suffix(suffix) {
            if stripped.chars().count() >= 3 {
                return stripped;
            }
        }
    }
    word
}

/// Truncate to at most `max_chars` characters, respecting char boundaries
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Trim, then cut to at most `max_chars` characters without splitting a word.
///
/// Prefers the last sentence end when it keeps at least half the budget,
/// otherwise the last word boundary. A single token longer than the budget
/// is hard-cut, since there is no boundary to fall back to.
pub fn truncate_at_boundary(text: &str, max_chars: usize) -> &str {
    let text = text.trim();
    let cut = match text.char_indices().nth(max_chars) {
        Some((idx, _)) => idx,
        None => return text,
    };

    let prefix = &text[..cut];
    if text[cut..].starts_with(char::is_whitespace) {
        return prefix.trim_end();
    }

    let sentence_end = prefix
        .char_indices()
        .filter(|&(i, c)| {
            matches!(c, '.' | '!' | '?') && prefix[i + 1..].starts_with(char::is_whitespace)
        })
        .map(|(i, _)| i + 1)
        .last();
    if let Some(end) = sentence_end {
        if end >= cut / 2 {
            return &prefix[..end];
        }
    }

    match prefix.rfind(char::is_whitespace) {
        Some(ws) => prefix[..ws].trim_end(),
        None => prefix,
    }
}
