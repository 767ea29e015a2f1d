//! Full-document processing for freshly uploaded files
//!
//! Runs summarize and tag through the orchestrator and attaches the content
//! analysis. A capability that fails terminally leaves its field empty; the
//! document itself is still processed.

use crate::analysis::DocumentAnalysis;
use crate::capability::CapabilityResult;
use crate::error::{DocpilotError, Result};
use crate::orchestrator::Orchestrator;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Everything persisted for one processed document
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedDocument {
    pub summary: Option<String>,
    pub summary_provider: Option<String>,
    pub tags: Vec<String>,
    pub tags_provider: Option<String>,
    pub analysis: DocumentAnalysis,
    pub processed_at: DateTime<Utc>,
}

impl ProcessedDocument {
    /// Tags as the single comma-separated field stored with a document
    pub fn tags_field(&self) -> String {
        self.tags.join(", ")
    }
}

/// Upload-time processing pipeline
pub struct DocumentProcessor {
    orchestrator: Arc<Orchestrator>,
}

impl DocumentProcessor {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }

    pub async fn process(&self, content: &str) -> Result<ProcessedDocument> {
        if content.trim().is_empty() {
            return Err(DocpilotError::EmptyContent);
        }

        let summary = self.orchestrator.summarize(content).await;
        let tags = self.orchestrator.tag(content).await;

        let (summary, summary_provider) = match summary {
            CapabilityResult::Success {
                payload, provider, ..
            } => (payload.as_summary().map(str::to_string), Some(provider)),
            CapabilityResult::Failure { reason, .. } => {
                tracing::warn!(reason = %reason, "Document stored without summary");
                (None, None)
            }
        };

        let (tags, tags_provider) = match tags {
            CapabilityResult::Success {
                payload, provider, ..
            } => (
                payload.as_tags().map(<[String]>::to_vec).unwrap_or_default(),
                Some(provider),
            ),
            CapabilityResult::Failure { reason, .. } => {
                tracing::warn!(reason = %reason, "Document stored without tags");
                (Vec::new(), None)
            }
        };

        let processed = ProcessedDocument {
            summary,
            summary_provider,
            tags,
            tags_provider,
            analysis: DocumentAnalysis::analyze(content),
            processed_at: Utc::now(),
        };

        tracing::info!(
            summary_provider = processed.summary_provider.as_deref().unwrap_or("none"),
            tags_provider = processed.tags_provider.as_deref().unwrap_or("none"),
            words = processed.analysis.word_count,
            "Document processed"
        );

        Ok(processed)
    }
}
