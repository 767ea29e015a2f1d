//! Capability requests and results

use crate::error::{DocpilotError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three supported operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    Summarize,
    Tag,
    Query,
}

impl CapabilityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::Tag => "tag",
            Self::Query => "query",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request against a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "capability", rename_all = "lowercase")]
pub enum CapabilityRequest {
    Summarize,
    Tag,
    Query { question: String },
}

impl CapabilityRequest {
    /// Create a query request
    pub fn query(question: impl Into<String>) -> Self {
        Self::Query {
            question: question.into(),
        }
    }

    pub fn kind(&self) -> CapabilityKind {
        match self {
            Self::Summarize => CapabilityKind::Summarize,
            Self::Tag => CapabilityKind::Tag,
            Self::Query { .. } => CapabilityKind::Query,
        }
    }
}

/// Upper bound on the number of tags in any result
pub const MAX_TAGS: usize = 5;

/// Capability-specific output of a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Payload {
    Summary(String),
    Tags(Vec<String>),
    Answer(String),
}

impl Payload {
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Self::Summary(_) => CapabilityKind::Summarize,
            Self::Tags(_) => CapabilityKind::Tag,
            Self::Answer(_) => CapabilityKind::Query,
        }
    }

    /// True when the payload carries nothing worth persisting
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Summary(text) | Self::Answer(text) => text.trim().is_empty(),
            Self::Tags(tags) => tags.is_empty(),
        }
    }

    pub fn as_summary(&self) -> Option<&str> {
        match self {
            Self::Summary(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_tags(&self) -> Option<&[String]> {
        match self {
            Self::Tags(tags) => Some(tags),
            _ => None,
        }
    }

    pub fn as_answer(&self) -> Option<&str> {
        match self {
            Self::Answer(text) => Some(text),
            _ => None,
        }
    }
}

/// What happened when the orchestrator reached one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum AttemptOutcome {
    Success,
    Failure { error_class: String, reason: String },
    Skipped,
}

/// One entry of the per-request provider trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderAttempt {
    pub provider: String,
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

impl ProviderAttempt {
    pub fn success(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            outcome: AttemptOutcome::Success,
        }
    }

    pub fn skipped(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            outcome: AttemptOutcome::Skipped,
        }
    }

    pub fn failure(
        provider: impl Into<String>,
        error_class: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            outcome: AttemptOutcome::Failure {
                error_class: error_class.into(),
                reason: reason.into(),
            },
        }
    }

    /// Whether the provider was actually invoked
    pub fn was_invoked(&self) -> bool {
        !matches!(self.outcome, AttemptOutcome::Skipped)
    }
}

/// Why a request produced no payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FailureReason {
    EmptyContent,
    AllProvidersExhausted { capability: CapabilityKind },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "the document contains no readable text content"),
            Self::AllProvidersExhausted { capability } => {
                write!(f, "all AI providers failed to {}", capability)
            }
        }
    }
}

/// Exactly one of these is produced per request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CapabilityResult {
    Success {
        payload: Payload,
        provider: String,
        attempts: Vec<ProviderAttempt>,
    },
    Failure {
        reason: FailureReason,
        attempts: Vec<ProviderAttempt>,
    },
}

impl CapabilityResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Self::Success { payload, .. } => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    /// Name of the provider whose output was surfaced
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::Success { provider, .. } => Some(provider),
            Self::Failure { .. } => None,
        }
    }

    pub fn attempts(&self) -> &[ProviderAttempt] {
        match self {
            Self::Success { attempts, .. } | Self::Failure { attempts, .. } => attempts,
        }
    }

    /// Convert into a `Result`, turning terminal failures into errors
    pub fn into_result(self) -> Result<(Payload, String)> {
        match self {
            Self::Success {
                payload, provider, ..
            } => Ok((payload, provider)),
            Self::Failure {
                reason: FailureReason::EmptyContent,
                ..
            } => Err(DocpilotError::EmptyContent),
            Self::Failure {
                reason: FailureReason::AllProvidersExhausted { capability },
                attempts,
            } => Err(DocpilotError::AllProvidersExhausted {
                capability,
                attempts: attempts.iter().filter(|a| a.was_invoked()).count(),
            }),
        }
    }
}
