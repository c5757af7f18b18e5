use std::sync::Arc;
use tracing::{debug, warn};

use crate::scoring::RecommendationEngine;
use crate::sentiment::{SentimentError, SentimentEstimator};
use crate::{format_float, ContentSample, ViralityResult};

pub const SUCCESS_CONFIDENCE: f64 = 0.85;

const NEUTRAL_BASE: f64 = 50.0;
const POSITIVE_BONUS: f64 = 15.0;
const NEGATIVE_PENALTY: f64 = 10.0;
const SENTIMENT_THRESHOLD: f64 = 0.1;
const MAX_SCORE: f64 = 100.0;

#[derive(Clone)]
pub struct ScoringEngine {
    estimator: Arc<dyn SentimentEstimator>,
    recommender: RecommendationEngine,
}

impl ScoringEngine {
    pub fn new(estimator: Arc<dyn SentimentEstimator>) -> Self {
        Self {
            estimator,
            recommender: RecommendationEngine::new(),
        }
    }

    pub fn score(&self, content: &ContentSample) -> ViralityResult {
        let sentiment = match self.sentiment(&content.text) {
            Ok(value) => value,
            Err(err) => {
                warn!(platform = %content.platform, "sentiment estimation failed: {}", err);
                return ViralityResult::degraded();
            }
        };

        let base = base_score(sentiment);
        let multiplier = content.platform_kind().multiplier();
        let score = round1((base * multiplier).min(MAX_SCORE));
        debug!(sentiment, base, multiplier, score, "scored content");

        ViralityResult {
            score,
            confidence: SUCCESS_CONFIDENCE,
            factors: vec![
                format!("Sentiment:{}", format_float(sentiment, 2)),
                format!("Platform:{}", content.platform),
                format!("Length:{}", content.char_count()),
            ],
            recommendations: self.recommender.recommend(content),
        }
    }

    fn sentiment(&self, text: &str) -> Result<f64, SentimentError> {
        let value = self.estimator.polarity(text)?;
        if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
            return Err(SentimentError::OutOfRange(value));
        }
        Ok(value)
    }
}

/// Score before the platform multiplier is applied.
pub fn base_score(sentiment: f64) -> f64 {
    if sentiment > SENTIMENT_THRESHOLD {
        NEUTRAL_BASE + POSITIVE_BONUS
    } else if sentiment < -SENTIMENT_THRESHOLD {
        NEUTRAL_BASE - NEGATIVE_PENALTY
    } else {
        NEUTRAL_BASE
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
