use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::generation::GenerationRequest;
use crate::ContentSample;

#[derive(Debug, Deserialize)]
pub struct ApiPredictRequest {
    pub content: String,
    pub platform: Option<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

impl ApiPredictRequest {
    pub fn into_sample(self) -> Result<ContentSample, AppError> {
        let platform = self.platform.unwrap_or_else(|| "general".to_string());
        Ok(ContentSample::new(self.content, platform).with_hashtags(self.hashtags))
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiGenerateRequest {
    pub topic: String,
    pub platform: Option<String>,
    pub tone: Option<String>,
    pub length: Option<String>,
}

impl ApiGenerateRequest {
    pub fn into_request(self) -> Result<GenerationRequest, AppError> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(AppError::Validation("topic is required".to_string()));
        }

        let mut request = GenerationRequest::new(topic);
        if let Some(platform) = non_blank(self.platform) {
            request.platform = platform;
        }
        if let Some(tone) = non_blank(self.tone) {
            request.tone = tone;
        }
        if let Some(length) = non_blank(self.length) {
            request.length = length;
        }
        Ok(request)
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiTrendRequest {
    pub keywords: Vec<String>,
    pub platform: Option<String>,
    pub timeframe: Option<String>,
}

impl ApiTrendRequest {
    pub fn platform(&self) -> &str {
        self.platform.as_deref().unwrap_or("general")
    }

    pub fn timeframe(&self) -> &str {
        self.timeframe.as_deref().unwrap_or("24h")
    }
}

#[derive(Debug, Deserialize)]
pub struct TopicsQuery {
    pub limit: Option<usize>,
}

/// `{"success": true, "data": ...}`
#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_defaults_platform() {
        let request: ApiPredictRequest =
            serde_json::from_str(r#"{"content":"hello world"}"#).unwrap();
        let sample = request.into_sample().unwrap();
        assert_eq!(sample.platform, "general");
        assert!(sample.hashtags.is_empty());
    }

    #[test]
    fn predict_keeps_empty_content_and_raw_platform() {
        let request: ApiPredictRequest =
            serde_json::from_str(r#"{"content":"","platform":" TikTok "}"#).unwrap();
        let sample = request.into_sample().unwrap();
        assert_eq!(sample.text, "");
        assert_eq!(sample.platform, " TikTok ");
    }

    #[test]
    fn generate_fills_defaults() {
        let request: ApiGenerateRequest =
            serde_json::from_str(r#"{"topic":" rust ","tone":""}"#).unwrap();
        let request = request.into_request().unwrap();
        assert_eq!(request.topic, "rust");
        assert_eq!(request.platform, "general");
        assert_eq!(request.tone, "engaging");
        assert_eq!(request.length, "medium");
    }
}
