use crate::scoring::Platform;
use crate::ContentSample;

pub const MAX_RECOMMENDATIONS: usize = 3;

const SHORT_CONTENT_CHARS: usize = 50;
const TIKTOK_MAX_CHARS: usize = 150;

pub const ADD_DETAIL: &str = "Consider adding more detail to increase engagement";
pub const ADD_HASHTAGS: &str = "Add relevant hashtags to increase discoverability";
pub const SHORTEN_TIKTOK: &str = "TikTok content works better when shorter and punchy";

/// Fixed-order improvement rules over a content sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn recommend(&self, content: &ContentSample) -> Vec<String> {
        let chars = content.char_count();
        let mut recommendations = Vec::new();

        if chars < SHORT_CONTENT_CHARS {
            recommendations.push(ADD_DETAIL.to_string());
        }
        if !content.has_hashtag() {
            recommendations.push(ADD_HASHTAGS.to_string());
        }
        if content.platform_kind() == Platform::TikTok && chars > TIKTOK_MAX_CHARS {
            recommendations.push(SHORTEN_TIKTOK.to_string());
        }

        recommendations.truncate(MAX_RECOMMENDATIONS);
        recommendations
    }
}
