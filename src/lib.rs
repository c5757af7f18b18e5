pub mod api;
pub mod config;
pub mod error;
pub mod generation;
pub mod llm;
pub mod scoring;
pub mod sentiment;
pub mod server;
pub mod trends;

use serde::{Deserialize, Serialize};

pub use scoring::{Platform, RecommendationEngine, ScoringEngine};
pub use sentiment::{LexiconSentiment, SentimentError, SentimentEstimator};

#[derive(Debug, Clone)]
pub struct ContentSample {
    pub text: String,
    pub platform: String,
    pub hashtags: Vec<String>,
}

impl ContentSample {
    pub fn new(text: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            platform: platform.into(),
            hashtags: Vec::new(),
        }
    }

    pub fn with_hashtags(mut self, hashtags: Vec<String>) -> Self {
        self.hashtags = hashtags;
        self
    }

    /// Length in characters, not bytes.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn has_hashtag(&self) -> bool {
        self.text.contains('#') || self.hashtags.iter().any(|tag| tag.contains('#'))
    }

    pub fn platform_kind(&self) -> Platform {
        Platform::from_label(&self.platform)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViralityResult {
    pub score: f64,
    pub confidence: f64,
    pub factors: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ViralityResult {
    /// Result reported when sentiment estimation fails.
    pub fn degraded() -> Self {
        Self {
            score: 50.0,
            confidence: 0.5,
            factors: vec!["Error in analysis".to_string()],
            recommendations: vec!["Review content and try again".to_string()],
        }
    }
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}

pub fn format_number(value: u64) -> String {
    let mut chars: Vec<char> = value.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}
