use std::sync::Arc;
use std::time::Instant;

use crate::{
    metrics::MetricsSink,
    models::{RecommendRequest, RecommendResponse, RecommendationMetrics},
    services::recommendations,
};

/// Service boundary around the recommendation engine
///
/// Decodes wire requests, runs the engine, stamps the response with the
/// boundary's own timing and hands the metrics to the configured sink.
#[derive(Clone)]
pub struct RecommendationService {
    metrics: Arc<dyn MetricsSink>,
}

impl RecommendationService {
    pub fn new(metrics: Arc<dyn MetricsSink>) -> Self {
        Self { metrics }
    }

    /// Handles one recommend call
    ///
    /// Always produces a response. Metrics failures are logged by the sink and
    /// never change the result.
    pub fn handle(&self, request: RecommendRequest) -> RecommendResponse {
        let RecommendRequest {
            play_counts,
            user_stats,
        } = request;

        let start = Instant::now();
        let mut result = recommendations::recommend(&play_counts, &user_stats);
        result.processing_time_seconds = start.elapsed().as_secs_f64();

        let metrics = RecommendationMetrics {
            processing_time: result.processing_time_seconds,
            num_trending: result.trending.len(),
        };
        self.metrics.record(&metrics);

        tracing::info!(
            processing_time = metrics.processing_time,
            num_trending = metrics.num_trending,
            users = result.recommendations.len(),
            "Request processed"
        );

        RecommendResponse::from(result)
    }
}
