use thiserror::Error;

pub const DEFAULT_MAX_CHARS: usize = 20_000;

#[derive(Debug, Error, PartialEq)]
pub enum SentimentError {
    #[error("text too long for sentiment analysis ({chars} > {limit} characters)")]
    TooLong { chars: usize, limit: usize },

    #[error("polarity out of range: {0}")]
    OutOfRange(f64),

    #[error("sentiment estimator unavailable: {0}")]
    Unavailable(String),
}

/// Black-box polarity estimate in [-1, 1].
pub trait SentimentEstimator: Send + Sync {
    fn polarity(&self, text: &str) -> Result<f64, SentimentError>;
}

const LEXICON: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("brilliant", 0.9),
    ("cool", 0.35),
    ("delightful", 1.0),
    ("enjoy", 0.4),
    ("excellent", 1.0),
    ("excited", 0.4),
    ("exciting", 0.3),
    ("fantastic", 0.4),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("incredible", 0.9),
    ("inspiring", 0.6),
    ("interesting", 0.5),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("positive", 0.2),
    ("proud", 0.8),
    ("success", 0.3),
    ("thanks", 0.2),
    ("useful", 0.3),
    ("win", 0.8),
    ("wonderful", 1.0),
    ("wow", 0.1),
    ("angry", -0.5),
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broken", -0.4),
    ("crap", -0.8),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("dumb", -0.375),
    ("fail", -0.5),
    ("failed", -0.5),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("mess", -0.6),
    ("negative", -0.3),
    ("poor", -0.4),
    ("sad", -0.5),
    ("scary", -0.5),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("ugly", -0.7),
    ("useless", -0.5),
    ("waste", -0.2),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("really", 1.2),
    ("so", 1.2),
    ("super", 1.3),
    ("totally", 1.2),
    ("very", 1.3),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "isn't", "wasn't", "aren't", "can't",
    "won't", "nothing",
];

// A modifier stops applying after this many unrelated words.
const MODIFIER_REACH: usize = 2;

/// Word-lexicon polarity estimator with intensifier and negation handling.
#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    max_chars: usize,
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl LexiconSentiment {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl SentimentEstimator for LexiconSentiment {
    fn polarity(&self, text: &str) -> Result<f64, SentimentError> {
        let chars = text.chars().count();
        if chars > self.max_chars {
            return Err(SentimentError::TooLong {
                chars,
                limit: self.max_chars,
            });
        }

        let mut total = 0.0;
        let mut matched = 0usize;
        let mut intensity = 1.0;
        let mut negated = false;
        let mut since_modifier = 0usize;

        for token in tokenize(text) {
            if NEGATORS.contains(&token.as_str()) {
                negated = true;
                since_modifier = 0;
                continue;
            }
            if let Some(factor) = lookup(INTENSIFIERS, &token) {
                intensity *= factor;
                since_modifier = 0;
                continue;
            }

            match lookup(LEXICON, &token) {
                Some(value) => {
                    let mut value = value * intensity;
                    if negated {
                        value *= -0.5;
                    }
                    total += value.clamp(-1.0, 1.0);
                    matched += 1;
                    intensity = 1.0;
                    negated = false;
                }
                None => {
                    since_modifier += 1;
                    if since_modifier > MODIFIER_REACH {
                        intensity = 1.0;
                        negated = false;
                    }
                }
            }
        }

        if matched == 0 {
            return Ok(0.0);
        }
        Ok((total / matched as f64).clamp(-1.0, 1.0))
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|ch: char| !(ch.is_alphanumeric() || ch == '\''))
        .map(|token| token.trim_matches('\'').to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

fn lookup(table: &[(&str, f64)], token: &str) -> Option<f64> {
    table
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, value)| *value)
}
