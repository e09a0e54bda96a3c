//! Domain model for users.
//!
//! A user is a username/password pair plus a role. Children additionally
//! carry points, a level and the history of ratings the level is derived from.

use serde::{Deserialize, Serialize};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Child,
    Parent,
    Teacher,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Child => "CHILD",
            UserRole::Parent => "PARENT",
            UserRole::Teacher => "TEACHER",
        }
    }

    /// Parse from storage, case-insensitive
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_uppercase().as_str() {
            "CHILD" => Ok(UserRole::Child),
            "PARENT" => Ok(UserRole::Parent),
            "TEACHER" => Ok(UserRole::Teacher),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Rating must be between 0 and 5, got {0}")]
    OutOfRange(f64),
    #[error("Level must be between 1 and 5, got {0}")]
    LevelOutOfRange(u8),
}

/// Check a rating without touching any child
pub fn validate_rating(rating: f64) -> Result<f64, RatingError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(RatingError::OutOfRange(rating))
    }
}

/// Level for a rating history: clamp(1, 5, floor(mean) + 1).
///
/// Returns None for an empty history, in which case the current level stands.
pub fn level_for_ratings(ratings: &[f64]) -> Option<u8> {
    if ratings.is_empty() {
        return None;
    }
    let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
    let level = (mean.floor() as i64 + 1).clamp(MIN_LEVEL as i64, MAX_LEVEL as i64);
    Some(level as u8)
}

/// Child-only state
#[derive(Debug, Clone, PartialEq)]
pub struct ChildProfile {
    points: u32,
    level: u8,
    ratings: Vec<f64>,
}

impl Default for ChildProfile {
    fn default() -> Self {
        Self {
            points: 0,
            level: MIN_LEVEL,
            ratings: Vec::new(),
        }
    }
}

impl ChildProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a profile from persisted fields.
    ///
    /// Ratings are replayed one by one, so the stored level only matters
    /// (and is only checked) when there is no rating history.
    pub fn restore(points: u32, level: u8, ratings: &[f64]) -> Result<Self, RatingError> {
        if ratings.is_empty() && !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            return Err(RatingError::LevelOutOfRange(level));
        }
        let mut profile = Self {
            points,
            level: level.clamp(MIN_LEVEL, MAX_LEVEL),
            ratings: Vec::with_capacity(ratings.len()),
        };
        for &rating in ratings {
            profile.add_rating(rating)?;
        }
        Ok(profile)
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn ratings(&self) -> &[f64] {
        &self.ratings
    }

    pub fn add_points(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
    }

    /// Append a rating and recompute the level from the full history.
    /// Returns the new level.
    pub fn add_rating(&mut self, rating: f64) -> Result<u8, RatingError> {
        let rating = validate_rating(rating)?;
        self.ratings.push(rating);
        if let Some(level) = level_for_ratings(&self.ratings) {
            self.level = level;
        }
        Ok(self.level)
    }

    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            None
        } else {
            Some(self.ratings.iter().sum::<f64>() / self.ratings.len() as f64)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserKind {
    Child(ChildProfile),
    Parent,
    Teacher,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub username: String,
    pub password: String,
    pub kind: UserKind,
}

impl User {
    /// Create a fresh user; children start at level 1 with no points
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: UserRole) -> Self {
        let kind = match role {
            UserRole::Child => UserKind::Child(ChildProfile::new()),
            UserRole::Parent => UserKind::Parent,
            UserRole::Teacher => UserKind::Teacher,
        };
        Self {
            username: username.into(),
            password: password.into(),
            kind,
        }
    }

    pub fn role(&self) -> UserRole {
        match self.kind {
            UserKind::Child(_) => UserRole::Child,
            UserKind::Parent => UserRole::Parent,
            UserKind::Teacher => UserRole::Teacher,
        }
    }

    /// Plaintext comparison, exact match only
    pub fn authenticate(&self, password: &str) -> bool {
        self.password == password
    }

    pub fn is_child(&self) -> bool {
        matches!(self.kind, UserKind::Child(_))
    }

    /// Parents and teachers manage tasks
    pub fn is_supervisor(&self) -> bool {
        matches!(self.kind, UserKind::Parent | UserKind::Teacher)
    }

    pub fn as_child(&self) -> Option<&ChildProfile> {
        match &self.kind {
            UserKind::Child(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn as_child_mut(&mut self) -> Option<&mut ChildProfile> {
        match &mut self.kind {
            UserKind::Child(profile) => Some(profile),
            _ => None,
        }
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_ratings() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(0.0f64..=5.0, 1..40)
    }

    proptest! {
        /// Level always follows clamp(1, 5, floor(mean) + 1) of the whole history
        #[test]
        fn prop_level_matches_mean_of_history(ratings in arb_ratings()) {
            let mut child = ChildProfile::new();
            for &r in &ratings {
                child.add_rating(r).unwrap();
            }
            let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
            let expected = ((mean.floor() as i64) + 1).clamp(1, 5) as u8;
            prop_assert_eq!(child.level(), expected);
            prop_assert!((1..=5).contains(&child.level()));
        }

        /// Replaying a stored history lands on the same level as live rating
        #[test]
        fn prop_restore_matches_live_history(ratings in arb_ratings(), stored_level in 1u8..=5) {
            let mut live = ChildProfile::new();
            for &r in &ratings {
                live.add_rating(r).unwrap();
            }
            let restored = ChildProfile::restore(0, stored_level, &ratings).unwrap();
            prop_assert_eq!(restored.level(), live.level());
        }

        /// Out-of-range ratings never change the profile
        #[test]
        fn prop_invalid_rating_is_noop(bad in prop_oneof![-100.0f64..-0.0001, 5.0001f64..100.0]) {
            let mut child = ChildProfile::restore(7, 3, &[2.0]).unwrap();
            let before = child.clone();
            prop_assert!(child.add_rating(bad).is_err());
            prop_assert_eq!(child, before);
        }
    }
}
