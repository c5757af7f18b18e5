pub mod engine;
pub mod platform;
pub mod recommend;

pub use engine::{ScoringEngine, SUCCESS_CONFIDENCE};
pub use platform::Platform;
pub use recommend::RecommendationEngine;
