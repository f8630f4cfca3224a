mod play_counts;
mod recommendation;
mod user_profile;

pub use play_counts::PlayCountTable;
pub use recommendation::{
    RecommendRequest, RecommendResponse, RecommendationMetrics, RecommendationResult,
    RecommendationSet,
};
pub use user_profile::UserProfile;
