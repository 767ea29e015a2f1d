//! Hugging Face inference API provider
//!
//! Uses a summarization model and an extractive question-answering model.
//! Neither produces tags, so tagging reports `Unsupported` and the
//! orchestrator moves on.

use super::client::APIMetrics;
use super::{MetricsSnapshot, Provider};
use crate::capability::CapabilityKind;
use crate::config::{Config, HuggingFaceConfig};
use crate::error::{DocpilotError, ProviderError, ProviderResult, Result};
use crate::text;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Instant;

pub const HUGGINGFACE_PROVIDER_NAME: &str = "huggingface";

const SUMMARY_MAX_LENGTH: u32 = 150;
const SUMMARY_MIN_LENGTH: u32 = 50;

/// Provider backed by the hosted inference API
pub struct HuggingFaceProvider {
    http_client: reqwest::Client,
    config: HuggingFaceConfig,
    metrics: APIMetrics,
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    inputs: &'a str,
    parameters: SummarizeParameters,
}

#[derive(Serialize)]
struct SummarizeParameters {
    max_length: u32,
    min_length: u32,
}

#[derive(Deserialize)]
struct SummaryItem {
    summary_text: String,
}

#[derive(Serialize)]
struct QaRequest<'a> {
    inputs: QaInputs<'a>,
}

#[derive(Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context: &'a str,
}

#[derive(Deserialize)]
struct QaResponse {
    answer: String,
    #[serde(default)]
    score: f64,
}

impl HuggingFaceProvider {
    /// Create from configuration; unavailable when no API key is set
    pub fn from_config(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.processing.timeout())
            .build()
            .map_err(DocpilotError::Http)?;

        Ok(Self {
            http_client,
            config: config.huggingface.clone(),
            metrics: APIMetrics::default(),
        })
    }

    /// Get current API metrics
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn prepare<'a>(&self, content: &'a str) -> ProviderResult<&'a str> {
        if !self.is_available() {
            return Err(ProviderError::Unavailable(
                "Hugging Face API key not configured".to_string(),
            ));
        }
        if content.trim().is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        Ok(text::truncate_chars(content, self.config.max_input_chars))
    }

    async fn post_model<B, R>(&self, model: &str, body: &B) -> ProviderResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let start = Instant::now();
        self.metrics.record_request();

        let url = format!(
            "{}/models/{}",
            self.config.base_url.trim_end_matches('/'),
            model
        );

        let mut req = self.http_client.post(&url).json(body);
        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let result = async {
            let response = req.send().await.map_err(ProviderError::from_reqwest)?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                return Err(ProviderError::HttpStatus { status, body });
            }

            let body = response.text().await.map_err(ProviderError::from_reqwest)?;
            serde_json::from_str::<R>(&body).map_err(|e| {
                ProviderError::Parse(format!("unexpected response from {}: {}", model, e))
            })
        }
        .await;

        if result.is_err() {
            self.metrics.record_error();
        }
        self.metrics.record_latency(start);
        result
    }
}

#[async_trait]
impl Provider for HuggingFaceProvider {
    fn name(&self) -> &str {
        HUGGINGFACE_PROVIDER_NAME
    }

    fn is_available(&self) -> bool {
        self.config.has_api_key()
    }

    async fn summarize(&self, content: &str) -> ProviderResult<String> {
        let content = self.prepare(content)?;
        let request = SummarizeRequest {
            inputs: content,
            parameters: SummarizeParameters {
                max_length: SUMMARY_MAX_LENGTH,
                min_length: SUMMARY_MIN_LENGTH,
            },
        };

        let items: Vec<SummaryItem> = self
            .post_model(&self.config.summarization_model, &request)
            .await?;

        items
            .into_iter()
            .map(|item| item.summary_text)
            .find(|s| !s.trim().is_empty())
            .ok_or_else(|| ProviderError::Parse("no summary_text in response".to_string()))
    }

    async fn tag(&self, _content: &str) -> ProviderResult<Vec<String>> {
        Err(ProviderError::Unsupported(CapabilityKind::Tag))
    }

    async fn query(&self, content: &str, question: &str) -> ProviderResult<String> {
        let context = self.prepare(content)?;
        let request = QaRequest {
            inputs: QaInputs { question, context },
        };

        let response: QaResponse = self.post_model(&self.config.qa_model, &request).await?;
        tracing::debug!(
            provider = HUGGINGFACE_PROVIDER_NAME,
            score = response.score,
            "QA model answered"
        );
        Ok(response.answer)
    }
}
