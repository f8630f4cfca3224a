use std::time::Instant;

use crate::models::{PlayCountTable, RecommendationResult, RecommendationSet, UserProfile};

/// Number of songs in the trending list
pub const TRENDING_LIMIT: usize = 5;

/// Ranks songs by play count and builds a recommendation list per user
///
/// Each user gets the trending songs that do not mention their top artist.
/// A user without a top artist gets an empty list rather than the full
/// trending list.
///
/// The returned `processing_time_seconds` covers only this call; the service
/// boundary replaces it with its own measurement.
pub fn recommend(play_counts: &PlayCountTable, users: &[UserProfile]) -> RecommendationResult {
    let start = Instant::now();

    let trending = trending_songs(play_counts);

    let recommendations: RecommendationSet = users
        .iter()
        .map(|user| (user.user_id.clone(), recommend_for_user(&trending, user)))
        .collect();

    tracing::debug!(
        songs = play_counts.len(),
        trending = trending.len(),
        users = users.len(),
        "Computed recommendations"
    );

    RecommendationResult {
        trending,
        recommendations,
        processing_time_seconds: start.elapsed().as_secs_f64(),
    }
}

/// Returns up to [`TRENDING_LIMIT`] songs ordered by descending play count
///
/// The sort is stable, so equal counts keep the table's order.
pub fn trending_songs(play_counts: &PlayCountTable) -> Vec<String> {
    let mut ranked: Vec<(&str, i32)> = play_counts.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(TRENDING_LIMIT)
        .map(|(song, _)| song.to_string())
        .collect()
}

/// Filters the trending list for one user
///
/// Matching is a case-sensitive substring check of the top artist against the
/// song identifier.
pub fn recommend_for_user(trending: &[String], user: &UserProfile) -> Vec<String> {
    if !user.has_top_artist() {
        return Vec::new();
    }

    trending
        .iter()
        .filter(|song| !song.contains(user.top_artist.as_str()))
        .cloned()
        .collect()
}
