//! Rule-based local provider
//!
//! No network, never unavailable, and never fails on non-empty input. It is
//! the guaranteed last link of the fallback chain.

use super::Provider;
use crate::capability::MAX_TAGS;
use crate::config::{Config, TagCategory};
use crate::error::{ProviderError, ProviderResult};
use crate::text;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

pub const LOCAL_PROVIDER_NAME: &str = "local-rule-based";

/// Emitted when no category matches
pub const DEFAULT_TAG: &str = "general";

/// Answer used when the question shares no keywords with the document
pub const NO_ANSWER_FOUND: &str =
    "No relevant information was found in the document for this question.";

/// Leading sentences used for extractive summaries
const SUMMARY_SENTENCES: usize = 3;

/// Sentences returned for a keyword-overlap answer
const ANSWER_SENTENCES: usize = 2;

/// Keyword and sentence heuristics
pub struct LocalProvider {
    max_summary_length: usize,
    max_tags: usize,
    categories: Vec<TagCategory>,
}

impl LocalProvider {
    /// `max_tags` is clamped to [`MAX_TAGS`]
    pub fn new(max_summary_length: usize, max_tags: usize, categories: Vec<TagCategory>) -> Self {
        Self {
            max_summary_length,
            max_tags: max_tags.min(MAX_TAGS),
            categories,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.processing.max_summary_length,
            config.processing.max_tags_count,
            config.tag_categories.clone(),
        )
    }

    /// Leading sentences that fit the length budget
    fn leading_sentences(&self, content: &str) -> String {
        let mut summary = String::new();

        for sentence in text::split_sentences(content)
            .into_iter()
            .take(SUMMARY_SENTENCES)
        {
            let separator = usize::from(!summary.is_empty());
            let length = summary.chars().count() + separator + sentence.chars().count();
            if length > self.max_summary_length {
                break;
            }
            if separator == 1 {
                summary.push(' ');
            }
            summary.push_str(sentence);
        }

        if summary.is_empty() {
            // first sentence alone is over budget
            text::truncate_at_boundary(content, self.max_summary_length).to_string()
        } else {
            summary
        }
    }

    /// Categories ranked by keyword hits, ties broken by vocabulary order
    fn rank_categories(&self, content: &str) -> Vec<String> {
        let tokens: Vec<String> = text::words(content).collect();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in &tokens {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }

        let mut scored: Vec<(usize, usize, &str)> = self
            .categories
            .iter()
            .enumerate()
            .filter_map(|(order, category)| {
                let score: usize = category
                    .keywords
                    .iter()
                    .map(|keyword| {
                        let phrase: Vec<String> = text::words(keyword).collect();
                        match phrase.as_slice() {
                            [] => 0,
                            [word] => counts.get(word.as_str()).copied().unwrap_or(0),
                            _ => tokens
                                .windows(phrase.len())
                                .filter(|window| *window == phrase.as_slice())
                                .count(),
                        }
                    })
                    .sum();
                (score > 0).then_some((score, order, category.name.as_str()))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        let tags: Vec<String> = scored
            .into_iter()
            .take(self.max_tags)
            .map(|(_, _, name)| name.to_string())
            .collect();

        if tags.is_empty() {
            vec![DEFAULT_TAG.to_string()]
        } else {
            tags
        }
    }

    /// Best sentences by keyword overlap with the question, in document order
    fn answer(&self, content: &str, question: &str) -> String {
        let lowered = question.to_lowercase();
        if ["summary", "summarize", "summarise"]
            .iter()
            .any(|w| lowered.contains(w))
        {
            return self.leading_sentences(content);
        }

        let terms: HashSet<String> = text::keywords(question)
            .map(|w| text::stem(&w).to_string())
            .collect();
        if terms.is_empty() {
            return NO_ANSWER_FOUND.to_string();
        }

        let sentences = text::split_sentences(content);
        let mut scored: Vec<(usize, usize)> = sentences
            .iter()
            .enumerate()
            .filter_map(|(idx, sentence)| {
                let found: HashSet<String> = text::keywords(sentence)
                    .map(|w| text::stem(&w).to_string())
                    .filter(|w| terms.contains(w))
                    .collect();
                (!found.is_empty()).then_some((found.len(), idx))
            })
            .collect();

        if scored.is_empty() {
            return NO_ANSWER_FOUND.to_string();
        }

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        let mut best: Vec<usize> = scored
            .into_iter()
            .take(ANSWER_SENTENCES)
            .map(|(_, idx)| idx)
            .collect();
        best.sort_unstable();

        best.into_iter()
            .map(|idx| sentences[idx])
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl Provider for LocalProvider {
    fn name(&self) -> &str {
        LOCAL_PROVIDER_NAME
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn summarize(&self, content: &str) -> ProviderResult<String> {
        if content.trim().is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        Ok(self.leading_sentences(content))
    }

    async fn tag(&self, content: &str) -> ProviderResult<Vec<String>> {
        if content.trim().is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        Ok(self.rank_categories(content))
    }

    async fn query(&self, content: &str, question: &str) -> ProviderResult<String> {
        if content.trim().is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        Ok(self.answer(content, question))
    }
}
