//! Fallback orchestration across providers
//!
//! For each request the configured providers are tried in ascending priority
//! order. Unavailable providers are skipped, failures are logged and absorbed,
//! and the first success is normalized and returned without consulting the
//! rest. A terminal failure is reported only when every provider has been
//! skipped or has failed.

use crate::capability::{
    CapabilityKind, CapabilityRequest, CapabilityResult, FailureReason, Payload, ProviderAttempt,
};
use crate::config::{Config, ProcessingConfig};
use crate::error::{ProviderError, Result};
use crate::normalizer::Normalizer;
use crate::providers::{build_providers, Provider};
use crate::text;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Static description of a configured provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderDescriptor {
    pub name: String,
    pub priority: usize,
    pub available: bool,
}

struct RegisteredProvider {
    priority: usize,
    provider: Arc<dyn Provider>,
}

/// Tries providers in order until one succeeds.
///
/// The provider list is fixed at construction and only read afterwards, so
/// one orchestrator can serve concurrent requests behind an `Arc`.
pub struct Orchestrator {
    providers: Vec<RegisteredProvider>,
    normalizer: Normalizer,
    max_content_length: usize,
    call_timeout: Duration,
}

impl Orchestrator {
    /// Create from `(priority, provider)` pairs; lower priority runs first.
    /// Equal priorities keep their given order.
    pub fn new(providers: Vec<(usize, Arc<dyn Provider>)>, settings: &ProcessingConfig) -> Self {
        let mut providers: Vec<RegisteredProvider> = providers
            .into_iter()
            .map(|(priority, provider)| RegisteredProvider { priority, provider })
            .collect();
        providers.sort_by_key(|p| p.priority);

        Self {
            providers,
            normalizer: Normalizer::from_config(settings),
            max_content_length: settings.max_content_length,
            call_timeout: settings.timeout(),
        }
    }

    /// Build the provider chain described by the configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let providers = build_providers(config)?;
        let orchestrator = Self::new(providers, &config.processing);

        tracing::info!(
            providers = ?orchestrator.provider_names(),
            "Orchestrator initialized"
        );

        Ok(orchestrator)
    }

    /// Configured providers in the order they are tried
    pub fn descriptors(&self) -> Vec<ProviderDescriptor> {
        self.providers
            .iter()
            .map(|p| ProviderDescriptor {
                name: p.provider.name().to_string(),
                priority: p.priority,
                available: p.provider.is_available(),
            })
            .collect()
    }

    fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.provider.name()).collect()
    }

    pub async fn summarize(&self, document: &str) -> CapabilityResult {
        self.execute(document, &CapabilityRequest::Summarize).await
    }

    pub async fn tag(&self, document: &str) -> CapabilityResult {
        self.execute(document, &CapabilityRequest::Tag).await
    }

    pub async fn query(&self, document: &str, question: &str) -> CapabilityResult {
        self.execute(document, &CapabilityRequest::query(question))
            .await
    }

    /// Run one capability request through the provider chain
    pub async fn execute(&self, document: &str, request: &CapabilityRequest) -> CapabilityResult {
        let capability = request.kind();
        let document = document.trim();

        if document.is_empty() {
            tracing::warn!(capability = %capability, "Rejecting request for empty document");
            return CapabilityResult::Failure {
                reason: FailureReason::EmptyContent,
                attempts: Vec::new(),
            };
        }

        let content = text::truncate_chars(document, self.max_content_length);
        let mut attempts = Vec::with_capacity(self.providers.len());

        for entry in &self.providers {
            let provider = entry.provider.as_ref();
            let name = provider.name();

            if !provider.is_available() {
                tracing::info!(
                    provider = name,
                    capability = %capability,
                    outcome = "skipped",
                    "Provider unavailable"
                );
                attempts.push(ProviderAttempt::skipped(name));
                continue;
            }

            match self.attempt(provider, content, request, capability).await {
                Ok(payload) => {
                    tracing::info!(
                        provider = name,
                        capability = %capability,
                        outcome = "success",
                        "Provider served request"
                    );
                    attempts.push(ProviderAttempt::success(name));
                    return CapabilityResult::Success {
                        payload,
                        provider: name.to_string(),
                        attempts,
                    };
                }
                Err(err) if err.is_skip() => {
                    tracing::info!(
                        provider = name,
                        capability = %capability,
                        outcome = "skipped",
                        reason = %err,
                        "Provider unavailable"
                    );
                    attempts.push(ProviderAttempt::skipped(name));
                }
                Err(err) => {
                    tracing::warn!(
                        provider = name,
                        capability = %capability,
                        outcome = "failure",
                        error_class = err.class(),
                        reason = %err,
                        "Provider failed, trying next"
                    );
                    attempts.push(ProviderAttempt::failure(name, err.class(), err.to_string()));
                }
            }
        }

        tracing::error!(
            capability = %capability,
            attempts = attempts.len(),
            "All providers exhausted"
        );

        CapabilityResult::Failure {
            reason: FailureReason::AllProvidersExhausted { capability },
            attempts,
        }
    }

    /// Invoke one provider under the call timeout and normalize its output
    async fn attempt(
        &self,
        provider: &dyn Provider,
        content: &str,
        request: &CapabilityRequest,
        capability: CapabilityKind,
    ) -> std::result::Result<Payload, ProviderError> {
        let payload = tokio::time::timeout(self.call_timeout, provider.execute(content, request))
            .await
            .map_err(|_| ProviderError::Timeout)??;

        if payload.kind() != capability {
            return Err(ProviderError::Parse(format!(
                "expected {} payload, got {}",
                capability,
                payload.kind()
            )));
        }

        let payload = self.normalizer.normalize(payload);
        if payload.is_empty() {
            return Err(ProviderError::Parse(format!(
                "provider returned an empty {} result",
                capability
            )));
        }

        Ok(payload)
    }
}
