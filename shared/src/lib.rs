use serde::{Deserialize, Serialize};
use std::fmt;

/// Public view of a user. Never carries the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    /// One of "CHILD", "PARENT", "TEACHER"
    pub role: String,
    /// Only present for children
    pub points: Option<u32>,
    /// Only present for children (1-5)
    pub level: Option<u8>,
}

/// A chore as displayed in a task table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub points: u32,
    /// Username of the child doing the task
    pub assigned_to: String,
    /// Username of the parent or teacher who created it
    pub created_by: String,
    /// One of "PENDING", "COMPLETED", "APPROVED", "REJECTED"
    pub status: String,
    pub rating: Option<f64>,
    /// Local timestamp, `YYYY-MM-DD HH:MM:SS`
    pub completed_date: Option<String>,
}

/// A reward wish as displayed in a wish table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishView {
    pub id: String,
    pub title: String,
    pub description: String,
    /// "product" or "activity"
    pub wish_type: String,
    pub required_level: u8,
    pub requested_by: String,
    /// One of "PENDING", "APPROVED", "REJECTED"
    pub status: String,
    pub approved_by: Option<String>,
}

/// Task counts for a single child, grouped by status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub approved: usize,
    pub rejected: usize,
    /// Sum of points over approved tasks
    pub points_earned: u32,
}

/// Progress report shown on a child's progress screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildProgress {
    pub username: String,
    pub points: u32,
    pub level: u8,
    pub ratings: Vec<f64>,
    /// None until the child has received a rating
    pub average_rating: Option<f64>,
    pub tasks: TaskSummary,
}

impl ChildProgress {
    pub const MAX_LEVEL: u8 = 5;

    /// Label for a level progress bar, e.g. "Level 3 / 5"
    pub fn level_label(&self) -> String {
        format!("Level {} / {}", self.level, Self::MAX_LEVEL)
    }

    /// Average rating formatted the way the progress screen shows it
    pub fn formatted_average(&self) -> String {
        match self.average_rating {
            Some(avg) => format!("{:.2}/5.0", avg),
            None => "No ratings yet.".to_string(),
        }
    }
}

impl fmt::Display for ChildProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} points, {}, average {}",
            self.username,
            self.points,
            self.level_label(),
            self.formatted_average()
        )
    }
}

/// Everything a dashboard needs after startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub users: Vec<UserProfile>,
    pub tasks: Vec<TaskView>,
    pub wishes: Vec<WishView>,
    pub progress: Vec<ChildProgress>,
}
