//! HTTP client for OpenAI-compatible chat completion services

use crate::config::OpenAiConfig;
use crate::error::{DocpilotError, ProviderError, ProviderResult, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Trait for chat completion clients
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Generate chat completion
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> ProviderResult<String>;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Chat message for completion requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Outbound request counters
#[derive(Debug, Default)]
pub(crate) struct APIMetrics {
    pub total_requests: AtomicU64,
    pub total_errors: AtomicU64,
    pub total_latency_ms: AtomicU64,
}

impl APIMetrics {
    pub fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.total_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Called once per request, whatever its outcome
    pub fn record_latency(&self, started: Instant) {
        let elapsed = started.elapsed().as_millis() as u64;
        self.total_latency_ms.fetch_add(elapsed, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let total = self.total_requests.load(Ordering::Relaxed);
        MetricsSnapshot {
            total_requests: total,
            total_errors: self.total_errors.load(Ordering::Relaxed),
            avg_latency_ms: if total > 0 {
                self.total_latency_ms.load(Ordering::Relaxed) as f64 / total as f64
            } else {
                0.0
            },
        }
    }
}

/// Snapshot of API metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub total_errors: u64,
    pub avg_latency_ms: f64,
}

/// OpenAI-compatible client
pub struct OpenAiClient {
    http_client: reqwest::Client,
    config: OpenAiConfig,
    metrics: Arc<APIMetrics>,
}

impl OpenAiClient {
    /// Create new client; `timeout` bounds every request
    pub fn new(config: OpenAiConfig, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DocpilotError::Http)?;

        Ok(Self {
            http_client,
            config,
            metrics: Arc::new(APIMetrics::default()),
        })
    }

    /// Get current API metrics
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn fail(&self, err: ProviderError, started: Instant) -> ProviderError {
        self.metrics.record_error();
        self.metrics.record_latency(started);
        err
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> ProviderResult<String> {
        let start = Instant::now();
        self.metrics.record_request();

        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage>,
            temperature: f32,
            max_tokens: u32,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<ChatChoice>,
        }

        #[derive(Deserialize)]
        struct ChatChoice {
            message: ChatMessage,
        }

        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let mut req = self.http_client.post(&url).json(&request);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req
            .send()
            .await
            .map_err(|e| self.fail(ProviderError::from_reqwest(e), start))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(self.fail(ProviderError::HttpStatus { status, body }, start));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.fail(ProviderError::from_reqwest(e), start))?;

        let chat_response: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            self.fail(
                ProviderError::Parse(format!("invalid chat completion JSON: {}", e)),
                start,
            )
        })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| {
                self.fail(
                    ProviderError::Parse("no choices in response".to_string()),
                    start,
                )
            })?
            .message
            .content;

        self.metrics.record_latency(start);

        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
