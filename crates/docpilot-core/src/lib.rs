//! Docpilot Core Library
//!
//! AI-assisted processing for uploaded documents.
//!
//! # Features
//! - Summaries, tags and natural-language answers for plain-text documents
//! - Hosted providers (OpenAI-compatible chat completions, Hugging Face inference)
//! - Rule-based local provider that always answers
//! - Ordered fallback across providers with uniform result normalization

pub mod analysis;
pub mod capability;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod orchestrator;
pub mod processing;
pub mod providers;
pub mod text;

pub use analysis::DocumentAnalysis;
pub use capability::{
    AttemptOutcome, CapabilityKind, CapabilityRequest, CapabilityResult, FailureReason, Payload,
    ProviderAttempt,
};
pub use config::{
    Config, HuggingFaceConfig, OpenAiConfig, ProcessingConfig, ProviderKind, TagCategory,
};
pub use error::{DocpilotError, Error, ProviderError, ProviderResult, Result};
pub use normalizer::Normalizer;
pub use orchestrator::{Orchestrator, ProviderDescriptor};
pub use processing::{DocumentProcessor, ProcessedDocument};
pub use providers::{
    ChatClient, ChatMessage, HuggingFaceProvider, LocalProvider, MetricsSnapshot, OpenAiClient,
    OpenAiProvider, Provider,
};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "docpilot";
