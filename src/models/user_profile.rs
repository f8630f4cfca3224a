use serde::{Deserialize, Serialize};

/// Per-user listening profile sent alongside the play counts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// Identifier the recommendations are keyed by
    pub user_id: String,
    /// The user's most played artist; empty means no preference
    #[serde(default)]
    pub top_artist: String,
}

impl UserProfile {
    /// Creates a profile for a user
    pub fn new(user_id: impl Into<String>, top_artist: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            top_artist: top_artist.into(),
        }
    }

    /// Whether the user declared a top artist
    pub fn has_top_artist(&self) -> bool {
        !self.top_artist.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_top_artist_means_no_preference() {
        let profile: UserProfile = serde_json::from_str(r#"{"user_id": "u1"}"#).unwrap();
        assert_eq!(profile, UserProfile::new("u1", ""));
        assert!(!profile.has_top_artist());
    }

    #[test]
    fn test_has_top_artist() {
        assert!(UserProfile::new("u1", "Queen").has_top_artist());
    }
}
