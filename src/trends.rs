//! Mock trend feed.
//!
//! Numbers are random placeholders; nothing here looks at real trend data.
//! Each call waits for a configured delay first to mimic an upstream lookup.

use chrono::Utc;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::TrendsConfig;

pub const MAX_TOPICS: usize = 50;
const RELATED_TRENDS: usize = 3;

const TREND_POOL: &[&str] = &[
    "Artificial Intelligence",
    "Machine Learning",
    "ChatGPT",
    "Social Media Trends",
    "Tech Innovation",
    "Digital Marketing",
    "Content Creation",
    "Viral Videos",
    "Meme Culture",
    "Web3",
];

#[derive(Debug, Error, PartialEq)]
pub enum TrendError {
    #[error("keywords must contain at least one non-empty keyword")]
    NoKeywords,

    #[error("limit must be between 1 and {max}, got {value}")]
    InvalidLimit { value: usize, max: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordTrend {
    pub keyword: String,
    pub volume: u32,
    pub growth: String,
    pub sentiment: f64,
    pub viral_score: u32,
    pub platforms: BTreeMap<String, u32>,
    pub related_trends: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendReport {
    pub trends: Vec<KeywordTrend>,
    pub timeframe: String,
    pub platform: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub keyword: String,
    pub volume: u32,
    pub growth: String,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct TrendAnalyzer {
    analyze_delay: Duration,
    topics_delay: Duration,
    seed: Option<u64>,
}

impl TrendAnalyzer {
    pub fn new(config: &TrendsConfig) -> Self {
        Self {
            analyze_delay: Duration::from_millis(config.analyze_delay_ms),
            topics_delay: Duration::from_millis(config.topics_delay_ms),
            seed: config.seed,
        }
    }

    pub async fn analyze_keywords(
        &self,
        keywords: &[String],
        platform: &str,
        timeframe: &str,
    ) -> Result<TrendReport, TrendError> {
        let keywords: Vec<&str> = keywords
            .iter()
            .map(|keyword| keyword.trim())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(TrendError::NoKeywords);
        }

        tokio::time::sleep(self.analyze_delay).await;

        let mut rng = self.rng();
        let trends = keywords
            .iter()
            .map(|keyword| keyword_trend(&mut rng, keyword))
            .collect();
        debug!(keywords = keywords.len(), platform, "analyzed keywords");

        Ok(TrendReport {
            trends,
            timeframe: timeframe.to_string(),
            platform: platform.to_string(),
            last_updated: Utc::now().to_rfc3339(),
        })
    }

    pub async fn trending_topics(&self, limit: usize) -> Result<Vec<TrendingTopic>, TrendError> {
        if limit == 0 || limit > MAX_TOPICS {
            return Err(TrendError::InvalidLimit {
                value: limit,
                max: MAX_TOPICS,
            });
        }

        tokio::time::sleep(self.topics_delay).await;

        let mut rng = self.rng();
        let topics = (0..limit)
            .map(|_| {
                let keyword = TREND_POOL.choose(&mut rng).copied().unwrap_or(TREND_POOL[0]);
                TrendingTopic {
                    keyword: keyword.to_string(),
                    volume: rng.gen_range(5_000..=100_000),
                    growth: format!("+{}%", rng.gen_range(10..=200)),
                    category: category(keyword).to_string(),
                }
            })
            .collect();
        Ok(topics)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn keyword_trend(rng: &mut StdRng, keyword: &str) -> KeywordTrend {
    let mut platforms = BTreeMap::new();
    platforms.insert("twitter".to_string(), rng.gen_range(1_000..=10_000));
    platforms.insert("instagram".to_string(), rng.gen_range(500..=5_000));
    platforms.insert("tiktok".to_string(), rng.gen_range(2_000..=20_000));
    platforms.insert("linkedin".to_string(), rng.gen_range(100..=1_000));

    KeywordTrend {
        keyword: keyword.to_string(),
        volume: rng.gen_range(1_000..=50_000),
        growth: format!("+{}%", rng.gen_range(5..=150)),
        sentiment: (rng.gen_range(-1.0..=1.0_f64) * 100.0).round() / 100.0,
        viral_score: rng.gen_range(60..=95),
        platforms,
        related_trends: TREND_POOL
            .choose_multiple(rng, RELATED_TRENDS)
            .map(|trend| trend.to_string())
            .collect(),
    }
}

pub fn category(keyword: &str) -> &'static str {
    let lowercase = keyword.to_lowercase();
    if ["ai", "tech", "digital", "machine"]
        .iter()
        .any(|needle| lowercase.contains(needle))
    {
        "Technology"
    } else if ["social", "media", "viral"]
        .iter()
        .any(|needle| lowercase.contains(needle))
    {
        "Social Media"
    } else {
        "General"
    }
}
