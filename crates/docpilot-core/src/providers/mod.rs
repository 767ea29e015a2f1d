//! AI providers
//!
//! Every backend implements [`Provider`]: three capability methods plus an
//! availability check. The orchestrator holds them as `Arc<dyn Provider>` in
//! priority order.

mod client;
mod huggingface;
mod local;
mod openai;

pub use client::{ChatClient, ChatMessage, MetricsSnapshot, OpenAiClient};
pub use huggingface::{HuggingFaceProvider, HUGGINGFACE_PROVIDER_NAME};
pub use local::{LocalProvider, DEFAULT_TAG, LOCAL_PROVIDER_NAME, NO_ANSWER_FOUND};
pub use openai::{parse_tag_list, OpenAiProvider, OPENAI_PROVIDER_NAME};

use crate::capability::{CapabilityRequest, Payload};
use crate::config::{Config, ProviderKind};
use crate::error::{ProviderResult, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// A pluggable backend for summarize / tag / query
#[async_trait]
pub trait Provider: Send + Sync {
    /// Name reported in results and logs
    fn name(&self) -> &str;

    /// False when credentials or configuration are missing
    fn is_available(&self) -> bool;

    /// Summarize document text
    async fn summarize(&self, text: &str) -> ProviderResult<String>;

    /// Produce topic tags for document text
    async fn tag(&self, text: &str) -> ProviderResult<Vec<String>>;

    /// Answer a question about document text
    async fn query(&self, text: &str, question: &str) -> ProviderResult<String>;

    /// Dispatch a capability request to the matching method
    async fn execute(&self, text: &str, request: &CapabilityRequest) -> ProviderResult<Payload> {
        match request {
            CapabilityRequest::Summarize => self.summarize(text).await.map(Payload::Summary),
            CapabilityRequest::Tag => self.tag(text).await.map(Payload::Tags),
            CapabilityRequest::Query { question } => {
                self.query(text, question).await.map(Payload::Answer)
            }
        }
    }
}

/// Build the configured providers, paired with their priority rank
pub fn build_providers(config: &Config) -> Result<Vec<(usize, Arc<dyn Provider>)>> {
    let mut providers: Vec<(usize, Arc<dyn Provider>)> = Vec::new();

    for (rank, kind) in config.provider_priority.iter().enumerate() {
        let provider: Arc<dyn Provider> = match kind {
            ProviderKind::OpenAi => Arc::new(OpenAiProvider::from_config(config)?),
            ProviderKind::HuggingFace => Arc::new(HuggingFaceProvider::from_config(config)?),
            ProviderKind::Local => {
                if !config.processing.local_processing {
                    tracing::info!("Local processing disabled; rule-based provider not registered");
                    continue;
                }
                Arc::new(LocalProvider::from_config(config))
            }
        };
        providers.push((rank, provider));
    }

    Ok(providers)
}
