use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{PlayCountTable, UserProfile};

/// Recommended songs keyed by user id
pub type RecommendationSet = HashMap<String, Vec<String>>;

/// Output of a single engine run
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationResult {
    /// Most played songs, highest count first
    pub trending: Vec<String>,
    /// Per-user lists drawn from `trending`, in trending order
    pub recommendations: RecommendationSet,
    /// Wall-clock duration of the run in seconds
    pub processing_time_seconds: f64,
}

// ============================================================================
// Wire Types
// ============================================================================

/// Request body for the recommend call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub play_counts: PlayCountTable,
    #[serde(default)]
    pub user_stats: Vec<UserProfile>,
}

/// Response body for the recommend call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendResponse {
    /// Seconds spent in the engine, measured at the service boundary
    pub processing_time: f64,
    pub trending_songs: Vec<String>,
    pub recommendations: HashMap<String, Vec<String>>,
}

impl From<RecommendationResult> for RecommendResponse {
    fn from(result: RecommendationResult) -> Self {
        Self {
            processing_time: result.processing_time_seconds,
            trending_songs: result.trending,
            recommendations: result.recommendations,
        }
    }
}

/// Metrics emitted after each recommend call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RecommendationMetrics {
    pub processing_time: f64,
    pub num_trending: usize,
}
