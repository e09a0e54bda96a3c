use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{validate_rating, RatingError};

/// Format used for `completed_date`
pub const COMPLETED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Pending,
    Completed,
    Approved,
    Rejected,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Approved => "APPROVED",
            TaskStatus::Rejected => "REJECTED",
        }
    }

    /// Parse from storage, case-insensitive
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(TaskStatus::Pending),
            "COMPLETED" => Ok(TaskStatus::Completed),
            "APPROVED" => Ok(TaskStatus::Approved),
            "REJECTED" => Ok(TaskStatus::Rejected),
            _ => Err(format!("Invalid task status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaskTransitionError {
    #[error("Only pending tasks can be completed (task is {})", .current.as_str())]
    NotPending { current: TaskStatus },
    #[error("Only completed tasks can be approved or rejected (task is {})", .current.as_str())]
    NotCompleted { current: TaskStatus },
    #[error(transparent)]
    Rating(#[from] RatingError),
}

/// A chore assigned to a child.
///
/// Status only moves forward: PENDING -> COMPLETED -> APPROVED | REJECTED.
/// Every transition method leaves the task untouched when it returns an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub points: u32,
    /// Child username
    pub assigned_to: String,
    /// Parent or teacher username
    pub created_by: String,
    pub status: TaskStatus,
    pub rating: Option<f64>,
    pub completed_date: Option<String>,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: impl Into<String>,
        points: u32,
        assigned_to: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Self::generate_id(),
            title: title.into(),
            description: description.into(),
            due_date: due_date.into(),
            points,
            assigned_to: assigned_to.into(),
            created_by: created_by.into(),
            status: TaskStatus::Pending,
            rating: None,
            completed_date: None,
        }
    }

    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn mark_completed(&mut self) -> Result<(), TaskTransitionError> {
        self.mark_completed_at(Local::now().naive_local())
    }

    pub fn mark_completed_at(&mut self, at: NaiveDateTime) -> Result<(), TaskTransitionError> {
        if self.status != TaskStatus::Pending {
            return Err(TaskTransitionError::NotPending { current: self.status });
        }
        self.status = TaskStatus::Completed;
        self.completed_date = Some(at.format(COMPLETED_DATE_FORMAT).to_string());
        Ok(())
    }

    /// Approve a completed task, optionally recording a rating
    pub fn approve(&mut self, rating: Option<f64>) -> Result<(), TaskTransitionError> {
        if self.status != TaskStatus::Completed {
            return Err(TaskTransitionError::NotCompleted { current: self.status });
        }
        let rating = rating.map(validate_rating).transpose()?;
        self.status = TaskStatus::Approved;
        if rating.is_some() {
            self.rating = rating;
        }
        Ok(())
    }

    pub fn reject(&mut self) -> Result<(), TaskTransitionError> {
        if self.status != TaskStatus::Completed {
            return Err(TaskTransitionError::NotCompleted { current: self.status });
        }
        self.status = TaskStatus::Rejected;
        Ok(())
    }

    pub fn is_assigned_to(&self, username: &str) -> bool {
        self.assigned_to == username
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task() -> Task {
        Task::new("Dishes", "Wash the dishes", "2025-06-01", 10, "alice", "mom")
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_new_task_is_pending() {
        let t = task();
        assert_eq!(t.status, TaskStatus::Pending);
        assert!(t.rating.is_none());
        assert!(t.completed_date.is_none());
        assert!(Uuid::parse_str(&t.id).is_ok());
        assert_ne!(t.id, task().id);
    }

    #[test]
    fn test_complete_then_approve() {
        let mut t = task();
        t.mark_completed_at(noon()).unwrap();
        assert_eq!(t.status, TaskStatus::Completed);
        assert_eq!(t.completed_date.as_deref(), Some("2025-06-01 12:30:05"));

        t.approve(Some(4.5)).unwrap();
        assert_eq!(t.status, TaskStatus::Approved);
        assert_eq!(t.rating, Some(4.5));
    }

    #[test]
    fn test_approve_without_rating() {
        let mut t = task();
        t.mark_completed().unwrap();
        t.approve(None).unwrap();
        assert_eq!(t.status, TaskStatus::Approved);
        assert!(t.rating.is_none());
    }

    #[test]
    fn test_complete_then_reject() {
        let mut t = task();
        t.mark_completed().unwrap();
        t.reject().unwrap();
        assert_eq!(t.status, TaskStatus::Rejected);
    }

    #[test]
    fn test_pending_task_cannot_be_approved_or_rejected() {
        let mut t = task();
        let before = t.clone();
        assert_eq!(
            t.approve(Some(3.0)),
            Err(TaskTransitionError::NotCompleted { current: TaskStatus::Pending })
        );
        assert_eq!(
            t.reject(),
            Err(TaskTransitionError::NotCompleted { current: TaskStatus::Pending })
        );
        assert_eq!(t, before);
    }

    #[test]
    fn test_completed_task_cannot_be_completed_again() {
        let mut t = task();
        t.mark_completed_at(noon()).unwrap();
        let before = t.clone();
        assert_eq!(
            t.mark_completed(),
            Err(TaskTransitionError::NotPending { current: TaskStatus::Completed })
        );
        assert_eq!(t, before);
    }

    #[test]
    fn test_terminal_states() {
        let mut approved = task();
        approved.mark_completed().unwrap();
        approved.approve(Some(2.0)).unwrap();
        assert!(approved.reject().is_err());
        assert!(approved.approve(Some(5.0)).is_err());
        assert!(approved.mark_completed().is_err());
        assert_eq!(approved.rating, Some(2.0));

        let mut rejected = task();
        rejected.mark_completed().unwrap();
        rejected.reject().unwrap();
        assert!(rejected.approve(None).is_err());
        assert_eq!(rejected.status, TaskStatus::Rejected);
    }

    #[test]
    fn test_invalid_rating_leaves_task_completed() {
        let mut t = task();
        t.mark_completed().unwrap();
        let err = t.approve(Some(9.0)).unwrap_err();
        assert_eq!(err, TaskTransitionError::Rating(RatingError::OutOfRange(9.0)));
        assert_eq!(t.status, TaskStatus::Completed);
        assert!(t.rating.is_none());
    }

    #[test]
    fn test_status_strings() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::Completed,
            TaskStatus::Approved,
            TaskStatus::Rejected,
        ] {
            assert_eq!(TaskStatus::from_string(status.as_str()), Ok(status));
        }
        assert_eq!(TaskStatus::from_string("approved"), Ok(TaskStatus::Approved));
        assert!(TaskStatus::from_string("DONE").is_err());
    }

    #[test]
    fn test_error_message_names_current_status() {
        let err = TaskTransitionError::NotCompleted { current: TaskStatus::Pending };
        assert_eq!(
            err.to_string(),
            "Only completed tasks can be approved or rejected (task is PENDING)"
        );
    }
}
