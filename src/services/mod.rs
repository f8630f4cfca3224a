pub mod recommendation_service;
pub mod recommendations;

pub use recommendation_service::RecommendationService;
