//! Configuration management
//!
//! Read once at process start and handed to the orchestrator explicitly.
//! Changing any value requires a restart.

mod vocabulary;

pub use vocabulary::{default_tag_categories, TagCategory};

use crate::capability::MAX_TAGS;
use crate::error::{DocpilotError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Content limits and timeouts shared by every provider
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// OpenAI-compatible chat completion service
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Hugging Face inference API
    #[serde(default)]
    pub huggingface: HuggingFaceConfig,

    /// Providers in the order they are tried
    #[serde(default = "default_provider_priority")]
    pub provider_priority: Vec<ProviderKind>,

    /// Vocabulary used by the rule-based tagger
    #[serde(default = "default_tag_categories")]
    pub tag_categories: Vec<TagCategory>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            processing: ProcessingConfig::default(),
            openai: OpenAiConfig::default(),
            huggingface: HuggingFaceConfig::default(),
            provider_priority: default_provider_priority(),
            tag_categories: default_tag_categories(),
        }
    }
}

/// Limits applied to every request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Document text is truncated to this many characters
    #[serde(default = "default_max_content_length")]
    pub max_content_length: usize,

    /// Maximum summary length in characters
    #[serde(default = "default_max_summary_length")]
    pub max_summary_length: usize,

    /// Maximum number of tags per document
    #[serde(default = "default_max_tags_count")]
    pub max_tags_count: usize,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Register the rule-based local provider
    #[serde(default = "default_true")]
    pub local_processing: bool,
}

impl ProcessingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_content_length: default_max_content_length(),
            max_summary_length: default_max_summary_length(),
            max_tags_count: default_max_tags_count(),
            timeout_secs: default_timeout(),
            local_processing: true,
        }
    }
}

/// OpenAI-compatible chat completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key; the provider is unavailable without one
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL, up to and including the version segment
    #[serde(default = "default_openai_url")]
    pub base_url: String,

    #[serde(default = "default_openai_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl OpenAiConfig {
    pub fn has_api_key(&self) -> bool {
        has_credential(&self.api_key)
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_url(),
            model: default_openai_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// Hugging Face inference API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuggingFaceConfig {
    /// API key; the provider is unavailable without one
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_hf_url")]
    pub base_url: String,

    #[serde(default = "default_hf_summarization_model")]
    pub summarization_model: String,

    #[serde(default = "default_hf_qa_model")]
    pub qa_model: String,

    /// Inference models accept far less text than chat models
    #[serde(default = "default_hf_max_input_chars")]
    pub max_input_chars: usize,
}

impl HuggingFaceConfig {
    pub fn has_api_key(&self) -> bool {
        has_credential(&self.api_key)
    }
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_hf_url(),
            summarization_model: default_hf_summarization_model(),
            qa_model: default_hf_qa_model(),
            max_input_chars: default_hf_max_input_chars(),
        }
    }
}

/// Provider backends that can appear in the priority list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    HuggingFace,
    Local,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OpenAi => "openai",
            Self::HuggingFace => "huggingface",
            Self::Local => "local",
        };
        f.write_str(name)
    }
}

impl FromStr for ProviderKind {
    type Err = DocpilotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "local" | "fallback" => Ok(Self::Local),
            other => Err(DocpilotError::Config(format!(
                "Unknown provider '{}' (expected openai, huggingface or local)",
                other
            ))),
        }
    }
}

fn has_credential(key: &Option<String>) -> bool {
    key.as_deref().is_some_and(|k| !k.trim().is_empty())
}

fn default_provider_priority() -> Vec<ProviderKind> {
    vec![
        ProviderKind::OpenAi,
        ProviderKind::HuggingFace,
        ProviderKind::Local,
    ]
}

fn default_max_content_length() -> usize {
    4000
}

fn default_max_summary_length() -> usize {
    200
}

fn default_max_tags_count() -> usize {
    5
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_openai_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.3
}

fn default_hf_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_hf_summarization_model() -> String {
    "facebook/bart-large-cnn".to_string()
}

fn default_hf_qa_model() -> String {
    "deepset/roberta-base-squad2".to_string()
}

fn default_hf_max_input_chars() -> usize {
    1000
}

impl Config {
    /// Load config from default path, then apply environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        let mut config = if path.exists() {
            Self::read_file(&path)?
        } else {
            Config::default()
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from an explicit path, then apply environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::read_file(path)?;
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, ignoring any config file
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    /// Layer environment variables over the current values.
    ///
    /// Blank values are ignored, so `OPENAI_API_KEY=""` leaves the provider
    /// unavailable.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(key) = var("OPENAI_API_KEY") {
            self.openai.api_key = Some(key);
        }
        if let Some(url) = var("OPENAI_BASE_URL") {
            self.openai.base_url = url;
        }
        if let Some(model) = var("OPENAI_MODEL") {
            self.openai.model = model;
        }
        if let Some(v) = var("OPENAI_MAX_TOKENS") {
            self.openai.max_tokens = parse_var("OPENAI_MAX_TOKENS", &v)?;
        }
        if let Some(v) = var("OPENAI_TEMPERATURE") {
            self.openai.temperature = parse_var("OPENAI_TEMPERATURE", &v)?;
        }

        if let Some(key) = var("HUGGINGFACE_API_KEY") {
            self.huggingface.api_key = Some(key);
        }
        if let Some(model) = var("HF_SUMMARIZATION_MODEL") {
            self.huggingface.summarization_model = model;
        }
        if let Some(model) = var("HF_QA_MODEL") {
            self.huggingface.qa_model = model;
        }

        if let Some(v) = var("DOCPILOT_MAX_CONTENT_LENGTH") {
            self.processing.max_content_length = parse_var("DOCPILOT_MAX_CONTENT_LENGTH", &v)?;
        }
        if let Some(v) = var("DOCPILOT_MAX_SUMMARY_LENGTH") {
            self.processing.max_summary_length = parse_var("DOCPILOT_MAX_SUMMARY_LENGTH", &v)?;
        }
        if let Some(v) = var("DOCPILOT_MAX_TAGS_COUNT") {
            self.processing.max_tags_count = parse_var("DOCPILOT_MAX_TAGS_COUNT", &v)?;
        }
        if let Some(v) = var("DOCPILOT_TIMEOUT_SECS") {
            self.processing.timeout_secs = parse_var("DOCPILOT_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = var("DOCPILOT_LOCAL_PROCESSING") {
            self.processing.local_processing = parse_flag("DOCPILOT_LOCAL_PROCESSING", &v)?;
        }
        if let Some(v) = var("DOCPILOT_PROVIDER_PRIORITY") {
            self.provider_priority = v
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(ProviderKind::from_str)
                .collect::<Result<Vec<_>>>()?;
        }

        Ok(())
    }

    /// Reject configurations the orchestrator cannot honor
    pub fn validate(&self) -> Result<()> {
        let limits = [
            ("max_content_length", self.processing.max_content_length),
            ("max_summary_length", self.processing.max_summary_length),
            ("max_tags_count", self.processing.max_tags_count),
            ("huggingface.max_input_chars", self.huggingface.max_input_chars),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(DocpilotError::Config(format!("{} must be positive", name)));
            }
        }
        if self.processing.max_tags_count > MAX_TAGS {
            return Err(DocpilotError::Config(format!(
                "max_tags_count must not exceed {}",
                MAX_TAGS
            )));
        }
        if self.processing.timeout_secs == 0 {
            return Err(DocpilotError::Config(
                "timeout_secs must be positive".to_string(),
            ));
        }

        if self.provider_priority.is_empty() {
            return Err(DocpilotError::Config(
                "provider_priority must list at least one provider".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for kind in &self.provider_priority {
            if !seen.insert(kind) {
                return Err(DocpilotError::Config(format!(
                    "provider '{}' listed more than once in provider_priority",
                    kind
                )));
            }
        }

        if self
            .tag_categories
            .iter()
            .any(|c| c.name.trim().is_empty() || c.keywords.is_empty())
        {
            return Err(DocpilotError::Config(
                "every tag category needs a name and at least one keyword".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .parse()
        .map_err(|e| DocpilotError::Config(format!("Invalid {}='{}': {}", name, value, e)))
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(DocpilotError::Config(format!(
            "Invalid {}='{}': expected true or false",
            name, value
        ))),
    }
}
