//! Uniform post-processing of provider output
//!
//! Every payload passes through here before it reaches the caller, whichever
//! provider produced it.

use crate::capability::{Payload, MAX_TAGS};
use crate::config::ProcessingConfig;
use crate::text;

/// Substituted for answers that are blank after trimming
pub const UNABLE_TO_ANSWER: &str = "I'm unable to answer that question from the document content.";

/// Shape validation and truncation for capability payloads
#[derive(Debug, Clone)]
pub struct Normalizer {
    max_summary_length: usize,
    max_tags: usize,
}

impl Normalizer {
    /// `max_tags` is clamped to [`MAX_TAGS`]
    pub fn new(max_summary_length: usize, max_tags: usize) -> Self {
        Self {
            max_summary_length,
            max_tags: max_tags.min(MAX_TAGS),
        }
    }

    pub fn from_config(config: &ProcessingConfig) -> Self {
        Self::new(config.max_summary_length, config.max_tags_count)
    }

    /// Trim and cut at a sentence or word boundary within the length budget
    pub fn summary(&self, raw: &str) -> String {
        text::truncate_at_boundary(raw, self.max_summary_length).to_string()
    }

    /// Lower-case, trim, drop empties and duplicates, cap the count.
    /// Order of first appearance is kept.
    pub fn tags(&self, raw: &[String]) -> Vec<String> {
        let mut tags: Vec<String> = Vec::with_capacity(self.max_tags);
        for tag in raw {
            if tags.len() >= self.max_tags {
                break;
            }
            let tag = tag.trim().to_lowercase();
            if tag.is_empty() || tags.contains(&tag) {
                continue;
            }
            tags.push(tag);
        }
        tags
    }

    /// Trim, substituting a fixed payload for blank answers
    pub fn answer(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            UNABLE_TO_ANSWER.to_string()
        } else {
            trimmed.to_string()
        }
    }

    pub fn normalize(&self, payload: Payload) -> Payload {
        match payload {
            Payload::Summary(summary) => Payload::Summary(self.summary(&summary)),
            Payload::Tags(tags) => Payload::Tags(self.tags(&tags)),
            Payload::Answer(answer) => Payload::Answer(self.answer(&answer)),
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_config(&ProcessingConfig::default())
    }
}
