use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use trendlens::generation::{
    GenerationAdapter, GenerationParams, GenerationRequest, TextProvider, FALLBACK_ENGAGEMENT,
};
use trendlens::llm::ProviderError;

struct RecordingProvider {
    reply: String,
    calls: Mutex<Vec<(String, GenerationParams)>>,
}

impl RecordingProvider {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextProvider for RecordingProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), *params));
        Ok(self.reply.clone())
    }
}

struct FailingProvider;

#[async_trait]
impl TextProvider for FailingProvider {
    async fn generate(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::Api {
            status: 503,
            message: "overloaded".to_string(),
        })
    }
}

fn request(topic: &str, platform: &str) -> GenerationRequest {
    let mut request = GenerationRequest::new(topic);
    request.platform = platform.to_string();
    request
}

#[tokio::test]
async fn provider_text_is_post_processed() {
    let provider = Arc::new(RecordingProvider::new(
        "Morning brew ritual ☕ #coffee #morning #routine #energy #focus #extra",
    ));
    let shared: Arc<dyn TextProvider> = provider.clone();
    let adapter = GenerationAdapter::new(Some(shared), GenerationParams::default());

    let result = adapter.generate(&request("coffee", "Instagram")).await;

    assert!(!result.fallback);
    assert_eq!(result.platform, "Instagram");
    assert_eq!(result.best_time, "11:00 AM - 1:00 PM");
    assert_eq!(
        result.hashtags,
        vec!["#coffee", "#morning", "#routine", "#energy", "#focus"]
    );
    assert!((70..95).contains(&result.estimated_engagement));

    let calls = provider.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].0,
        "Create engaging content for Instagram about coffee. Length: medium. Include hashtags optimized for virality."
    );
    assert_eq!(calls[0].1.max_tokens, 300);
    assert!((calls[0].1.temperature - 0.8).abs() < 1e-9);
}

#[tokio::test]
async fn provider_failure_falls_back() {
    let provider: Arc<dyn TextProvider> = Arc::new(FailingProvider);
    let adapter = GenerationAdapter::new(Some(provider), GenerationParams::default());

    let result = adapter.generate(&request("rust", "twitter")).await;

    assert!(result.fallback);
    assert!(result.content.contains("rust"));
    assert_eq!(result.estimated_engagement, FALLBACK_ENGAGEMENT);
    assert_eq!(result.best_time, "9:00 AM - 10:00 AM");
}

#[tokio::test]
async fn missing_provider_falls_back() {
    let adapter = GenerationAdapter::new(None, GenerationParams::default());

    let result = adapter.generate(&request("gardening", "mastodon")).await;

    assert!(result.fallback);
    assert_eq!(result.best_time, "2:00 PM - 4:00 PM");
    assert_eq!(result.hashtags, vec!["#trending", "#viral"]);
}
