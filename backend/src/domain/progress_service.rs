//! Per-child progress reports: points, level, rating history and a tally of
//! the child's tasks by status.

use anyhow::Result;
use log::debug;

use crate::domain::data_manager::DataManager;
use crate::domain::errors::ValidationError;
use crate::domain::models::{ChildProfile, TaskStatus, User};
use shared::{ChildProgress, TaskSummary};

#[derive(Debug, Clone, Default)]
pub struct ProgressService;

impl ProgressService {
    pub fn new() -> Self {
        Self
    }

    pub fn child_progress(&self, data: &DataManager, username: &str) -> Result<ChildProgress> {
        let child = data
            .get_user(username)
            .and_then(User::as_child)
            .ok_or_else(|| ValidationError::UnknownChild(username.to_string()))?;
        Ok(Self::build(data, username, child))
    }

    /// One report per child, ordered by username
    pub fn all_children_progress(&self, data: &DataManager) -> Vec<ChildProgress> {
        let reports: Vec<ChildProgress> = data
            .children()
            .into_iter()
            .filter_map(|user| user.as_child().map(|child| Self::build(data, &user.username, child)))
            .collect();
        debug!("Built progress for {} children", reports.len());
        reports
    }

    fn build(data: &DataManager, username: &str, child: &ChildProfile) -> ChildProgress {
        let mut summary = TaskSummary::default();
        for task in data.tasks_for_child(username) {
            summary.total += 1;
            match task.status {
                TaskStatus::Pending => summary.pending += 1,
                TaskStatus::Completed => summary.completed += 1,
                TaskStatus::Approved => {
                    summary.approved += 1;
                    summary.points_earned = summary.points_earned.saturating_add(task.points);
                }
                TaskStatus::Rejected => summary.rejected += 1,
            }
        }

        ChildProgress {
            username: username.to_string(),
            points: child.points(),
            level: child.level(),
            ratings: child.ratings().to_vec(),
            average_rating: child.average_rating(),
            tasks: summary,
        }
    }
}
