use std::sync::Arc;

use crate::metrics::{MetricsSink, NoopMetricsSink};
use crate::services::RecommendationService;

/// Shared application state
///
/// Holds no per-request data; every call builds and drops its own tables.
#[derive(Clone)]
pub struct AppState {
    pub recommender: RecommendationService,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(NoopMetricsSink))
    }
}

impl AppState {
    /// Creates state whose recommend calls report to `metrics`
    pub fn new(metrics: Arc<dyn MetricsSink>) -> Self {
        Self {
            recommender: RecommendationService::new(metrics),
        }
    }
}
