//! Hosted chat-completion provider

use super::{ChatClient, ChatMessage, OpenAiClient, Provider};
use crate::capability::MAX_TAGS;
use crate::config::Config;
use crate::error::{ProviderError, ProviderResult, Result};
use crate::text;
use async_trait::async_trait;
use std::sync::Arc;

pub const OPENAI_PROVIDER_NAME: &str = "openai";

const SUMMARY_SYSTEM_PROMPT: &str = "You are an expert at summarizing documents. \
Create a concise, informative summary that captures the key points, main objectives, \
achievements, and important details from the document. \
Keep the summary under 200 words and focus on the most important information.";

const TAG_SYSTEM_PROMPT: &str = "You are an expert at categorizing and tagging documents. \
Analyze the document content and generate 3-5 relevant tags that best describe the document. \
Return only the tags as a comma-separated list, no additional text.";

const QUERY_SYSTEM_PROMPT: &str = "You are a helpful AI assistant that answers questions about documents. \
Provide accurate, concise answers based only on the information in the document content provided. \
If the document doesn't contain information to answer the question, say so clearly.";

/// Summarize / tag / query through an OpenAI-compatible chat client
pub struct OpenAiProvider {
    client: Arc<dyn ChatClient>,
    available: bool,
    max_content_length: usize,
}

impl OpenAiProvider {
    /// Create from a chat client
    pub fn new(client: Arc<dyn ChatClient>, available: bool, max_content_length: usize) -> Self {
        Self {
            client,
            available,
            max_content_length,
        }
    }

    /// Create from configuration; unavailable when no API key is set
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = OpenAiClient::new(config.openai.clone(), config.processing.timeout())?;
        Ok(Self::new(
            Arc::new(client),
            config.openai.has_api_key(),
            config.processing.max_content_length,
        ))
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    async fn complete(&self, system: &str, user: String) -> ProviderResult<String> {
        if !self.available {
            return Err(ProviderError::Unavailable(
                "OpenAI API key not configured".to_string(),
            ));
        }

        let messages = vec![ChatMessage::system(system), ChatMessage::user(user)];
        let content = self.client.chat_completion(messages).await?;

        if content.trim().is_empty() {
            return Err(ProviderError::Parse("empty completion".to_string()));
        }
        Ok(content)
    }

    fn prepare<'a>(&self, content: &'a str) -> ProviderResult<&'a str> {
        if content.trim().is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        Ok(text::truncate_chars(content, self.max_content_length))
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        OPENAI_PROVIDER_NAME
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn summarize(&self, content: &str) -> ProviderResult<String> {
        let content = self.prepare(content)?;
        let prompt = format!(
            r#"Please provide a comprehensive summary of the following document:

{}

Focus on:
- Main topic/purpose
- Key achievements or results
- Important features or capabilities
- Current status or progress
- Next steps or future plans (if mentioned)"#,
            content
        );

        self.complete(SUMMARY_SYSTEM_PROMPT, prompt).await
    }

    async fn tag(&self, content: &str) -> ProviderResult<Vec<String>> {
        let content = self.prepare(content)?;
        let prompt = format!(
            r#"Analyze this document and provide 3-5 relevant tags:

{}

Return only the tags as a comma-separated list."#,
            content
        );

        let response = self.complete(TAG_SYSTEM_PROMPT, prompt).await?;
        let tags = parse_tag_list(&response, MAX_TAGS);
        if tags.is_empty() {
            return Err(ProviderError::Parse(format!(
                "no tags found in response: {}",
                response
            )));
        }
        Ok(tags)
    }

    async fn query(&self, content: &str, question: &str) -> ProviderResult<String> {
        let content = self.prepare(content)?;
        let prompt = format!(
            r#"Document Content:
{}

User Question: {}

Please answer the question based on the document content above."#,
            content, question
        );

        self.complete(QUERY_SYSTEM_PROMPT, prompt).await
    }
}

/// Split a comma-separated tag reply into at most `max` distinct tags.
///
/// Entries are trimmed (including stray quotes and list markers) and
/// de-duplicated case-insensitively; first spelling wins.
pub fn parse_tag_list(response: &str, max: usize) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for raw in response.split([',', '\n']) {
        let tag = raw
            .trim()
            .trim_start_matches(['-', '*', '#'])
            .trim_matches(['"', '\'', '`', '.'])
            .trim();
        if tag.is_empty() {
            continue;
        }
        if tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            continue;
        }
        tags.push(tag.to_string());
        if tags.len() == max {
            break;
        }
    }

    tags
}
