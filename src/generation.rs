use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::ProviderConfig;
use crate::llm::ProviderError;
use crate::scoring::Platform;

pub const MAX_HASHTAGS: usize = 5;
pub const FALLBACK_ENGAGEMENT: u32 = 75;

const DEFAULT_PLATFORM: &str = "general";
const DEFAULT_TONE: &str = "engaging";
const DEFAULT_LENGTH: &str = "medium";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 300,
            temperature: 0.8,
        }
    }
}

impl From<&ProviderConfig> for GenerationParams {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// External generative text provider.
#[async_trait]
pub trait TextProvider: Send + Sync {
    async fn generate(&self, prompt: &str, params: &GenerationParams)
        -> Result<String, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub topic: String,
    pub platform: String,
    pub tone: String,
    pub length: String,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            platform: DEFAULT_PLATFORM.to_string(),
            tone: DEFAULT_TONE.to_string(),
            length: DEFAULT_LENGTH.to_string(),
        }
    }

    pub fn prompt(&self) -> String {
        format!(
            "Create {} content for {} about {}. Length: {}. Include hashtags optimized for virality.",
            self.tone, self.platform, self.topic, self.length
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub content: String,
    pub platform: String,
    pub estimated_engagement: u32,
    pub hashtags: Vec<String>,
    pub best_time: String,
    pub fallback: bool,
}

#[derive(Clone)]
pub struct GenerationAdapter {
    provider: Option<Arc<dyn TextProvider>>,
    params: GenerationParams,
}

impl GenerationAdapter {
    pub fn new(provider: Option<Arc<dyn TextProvider>>, params: GenerationParams) -> Self {
        Self { provider, params }
    }

    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let prompt = request.prompt();
        let outcome = match &self.provider {
            Some(provider) => provider.generate(&prompt, &self.params).await,
            None => Err(ProviderError::NotConfigured),
        };

        match outcome {
            Ok(text) => {
                info!(platform = %request.platform, chars = text.len(), "generated content");
                build_result(request, text, estimate_engagement(), false)
            }
            Err(err) => {
                warn!(topic = %request.topic, "content generation failed: {}", err);
                build_result(request, fallback_content(&request.topic), FALLBACK_ENGAGEMENT, true)
            }
        }
    }
}

fn build_result(
    request: &GenerationRequest,
    content: String,
    estimated_engagement: u32,
    fallback: bool,
) -> GenerationResult {
    GenerationResult {
        hashtags: extract_hashtags(&content),
        best_time: Platform::from_label(&request.platform)
            .best_time()
            .to_string(),
        platform: request.platform.clone(),
        estimated_engagement,
        content,
        fallback,
    }
}

pub fn fallback_content(topic: &str) -> String {
    format!(
        "Check out the latest on {}! Share your thoughts below. #trending #viral",
        topic
    )
}

/// Whitespace-delimited tokens starting with `#`, first five only.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|token| token.starts_with('#'))
        .take(MAX_HASHTAGS)
        .map(str::to_string)
        .collect()
}

fn estimate_engagement() -> u32 {
    rand::thread_rng().gen_range(70..95)
}
