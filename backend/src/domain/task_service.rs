//! Task workflow: parents and teachers assign, children complete, and the
//! approving supervisor rates the work.
//!
//! ## Rules
//!
//! - Only parents and teachers create, approve, reject and delete tasks
//! - Only the assigned child completes a task
//! - Approval needs a rating in [0, 5]; the child is credited the task's
//!   points and the rating joins the child's history
//! - Every successful change is written to storage before returning

use anyhow::Result;
use log::info;

use crate::domain::commands::task::{
    ApproveTaskCommand, ApproveTaskResult, CreateTaskCommand, TaskActionCommand, TaskListResult,
    TaskResult,
};
use crate::domain::data_manager::DataManager;
use crate::domain::errors::{PermissionError, ValidationError};
use crate::domain::models::user::validate_rating;
use crate::domain::models::{Task, User};
use crate::domain::user_service::UserService;

#[derive(Debug, Clone, Default)]
pub struct TaskService;

impl TaskService {
    pub fn new() -> Self {
        Self
    }

    fn require_supervisor<'a>(
        data: &'a DataManager,
        username: &str,
        action: &'static str,
    ) -> Result<&'a User, PermissionError> {
        let user = UserService::require_user(data, username)?;
        if !user.is_supervisor() {
            return Err(PermissionError::not_allowed(username, user.role(), action));
        }
        Ok(user)
    }

    fn require_task<'a>(data: &'a DataManager, task_id: &str) -> Result<&'a Task, ValidationError> {
        data.task(task_id)
            .ok_or_else(|| ValidationError::TaskNotFound(task_id.to_string()))
    }

    pub fn create_task(&self, data: &mut DataManager, command: CreateTaskCommand) -> Result<TaskResult> {
        Self::require_supervisor(data, &command.actor, "create tasks")?;

        for (field, value) in [
            ("Title", &command.title),
            ("Description", &command.description),
            ("Due date", &command.due_date),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(field).into());
            }
        }

        match data.get_user(&command.assigned_to) {
            Some(user) if user.is_child() => {}
            _ => return Err(ValidationError::UnknownChild(command.assigned_to).into()),
        }

        let task = Task::new(
            command.title.trim(),
            command.description.trim(),
            command.due_date.trim(),
            command.points,
            command.assigned_to,
            command.actor,
        );
        data.add_task(task.clone());
        data.save_tasks()?;

        info!("Created task {} for {} ({} points)", task.id, task.assigned_to, task.points);
        Ok(TaskResult { task })
    }

    pub fn complete_task(&self, data: &mut DataManager, command: TaskActionCommand) -> Result<TaskResult> {
        let actor = UserService::require_user(data, &command.actor)?;
        let task = Self::require_task(data, &command.task_id)?;
        if !actor.is_child() || !task.is_assigned_to(&actor.username) {
            return Err(PermissionError::not_allowed(&command.actor, actor.role(), "complete this task").into());
        }

        let task = data
            .task_mut(&command.task_id)
            .ok_or_else(|| ValidationError::TaskNotFound(command.task_id.clone()))?;
        task.mark_completed()?;
        let task = task.clone();
        data.save_tasks()?;

        info!("Task {} completed by {}", task.id, command.actor);
        Ok(TaskResult { task })
    }

    /// Approve a completed task, crediting points and recording the rating
    pub fn approve_task(&self, data: &mut DataManager, command: ApproveTaskCommand) -> Result<ApproveTaskResult> {
        Self::require_supervisor(data, &command.actor, "approve tasks")?;
        let rating = validate_rating(command.rating)?;

        let assigned_to = Self::require_task(data, &command.task_id)?.assigned_to.clone();
        if data.get_user(&assigned_to).and_then(User::as_child).is_none() {
            return Err(ValidationError::UnknownChild(assigned_to).into());
        }

        let task = data
            .task_mut(&command.task_id)
            .ok_or_else(|| ValidationError::TaskNotFound(command.task_id.clone()))?;
        task.approve(Some(rating))?;
        let task = task.clone();

        let child = data
            .get_user_mut(&assigned_to)
            .and_then(User::as_child_mut)
            .ok_or_else(|| ValidationError::UnknownChild(assigned_to.clone()))?;
        child.add_points(task.points);
        let child_level = child.add_rating(rating)?;
        let child_points = child.points();

        data.save_tasks()?;
        data.save_users()?;

        info!(
            "Task {} approved by {} with rating {}; {} now has {} points at level {}",
            task.id, command.actor, rating, assigned_to, child_points, child_level
        );
        Ok(ApproveTaskResult {
            task,
            child_points,
            child_level,
        })
    }

    pub fn reject_task(&self, data: &mut DataManager, command: TaskActionCommand) -> Result<TaskResult> {
        Self::require_supervisor(data, &command.actor, "reject tasks")?;

        let task = data
            .task_mut(&command.task_id)
            .ok_or_else(|| ValidationError::TaskNotFound(command.task_id.clone()))?;
        task.reject()?;
        let task = task.clone();
        data.save_tasks()?;

        info!("Task {} rejected by {}", task.id, command.actor);
        Ok(TaskResult { task })
    }

    pub fn delete_task(&self, data: &mut DataManager, command: TaskActionCommand) -> Result<TaskResult> {
        Self::require_supervisor(data, &command.actor, "delete tasks")?;

        let task = data
            .remove_task(&command.task_id)
            .ok_or_else(|| ValidationError::TaskNotFound(command.task_id.clone()))?;
        data.save_tasks()?;

        info!("Task {} deleted by {}", task.id, command.actor);
        Ok(TaskResult { task })
    }

    /// Children see their own tasks; parents and teachers see all of them
    pub fn list_tasks(&self, data: &DataManager, username: &str) -> Result<TaskListResult> {
        let user = UserService::require_user(data, username)?;
        let tasks = if user.is_child() {
            data.tasks_for_child(username).into_iter().cloned().collect()
        } else {
            data.tasks().to_vec()
        };
        Ok(TaskListResult { tasks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::user::RatingError;
    use crate::domain::models::{TaskStatus, TaskTransitionError};
    use crate::storage::test_utils::TestEnvironment;

    fn create(actor: &str, assigned_to: &str) -> CreateTaskCommand {
        CreateTaskCommand {
            actor: actor.to_string(),
            title: "Dishes".to_string(),
            description: "Wash and dry".to_string(),
            due_date: "2025-06-01".to_string(),
            points: 10,
            assigned_to: assigned_to.to_string(),
        }
    }

    fn action(actor: &str, task_id: &str) -> TaskActionCommand {
        TaskActionCommand {
            actor: actor.to_string(),
            task_id: task_id.to_string(),
        }
    }

    fn approve(actor: &str, task_id: &str, rating: f64) -> ApproveTaskCommand {
        ApproveTaskCommand {
            actor: actor.to_string(),
            task_id: task_id.to_string(),
            rating,
        }
    }

    fn setup() -> (TestEnvironment, DataManager, TaskService, String) {
        let env = TestEnvironment::new().unwrap();
        let mut data = env.seeded_data_manager().unwrap();
        let service = TaskService::new();
        let id = service.create_task(&mut data, create("mom", "alice")).unwrap().task.id;
        (env, data, service, id)
    }

    #[test]
    fn test_full_workflow_credits_child_and_persists() {
        let (env, mut data, service, id) = setup();

        let completed = service.complete_task(&mut data, action("alice", &id)).unwrap();
        assert_eq!(completed.task.status, TaskStatus::Completed);
        assert!(completed.task.completed_date.is_some());

        let approved = service.approve_task(&mut data, approve("mr_smith", &id, 3.0)).unwrap();
        assert_eq!(approved.task.status, TaskStatus::Approved);
        assert_eq!(approved.task.rating, Some(3.0));
        assert_eq!(approved.child_points, 10);
        assert_eq!(approved.child_level, 4);

        let reloaded = env.data_manager();
        let alice = reloaded.get_user("alice").unwrap().as_child().unwrap();
        assert_eq!(alice.points(), 10);
        assert_eq!(alice.ratings(), &[3.0]);
        assert_eq!(alice.level(), 4);
        assert_eq!(reloaded.task(&id).unwrap().status, TaskStatus::Approved);
    }

    #[test]
    fn test_create_requires_supervisor_fields_and_child() {
        let env = TestEnvironment::new().unwrap();
        let mut data = env.seeded_data_manager().unwrap();
        let service = TaskService::new();

        let err = service.create_task(&mut data, create("alice", "bob")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PermissionError>(),
            Some(PermissionError::NotAllowed { .. })
        ));

        let err = service.create_task(&mut data, create("mom", "mr_smith")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::UnknownChild("mr_smith".to_string()))
        );

        let mut blank = create("mom", "alice");
        blank.due_date = " ".to_string();
        let err = service.create_task(&mut data, blank).unwrap_err();
        assert_eq!(err.downcast_ref::<ValidationError>(), Some(&ValidationError::EmptyField("Due date")));

        let err = service.create_task(&mut data, create("ghost", "alice")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PermissionError>(),
            Some(&PermissionError::UnknownUser("ghost".to_string()))
        );

        assert!(data.tasks().is_empty());
    }

    #[test]
    fn test_only_assignee_completes() {
        let (_env, mut data, service, id) = setup();
        for actor in ["bob", "mom"] {
            let err = service.complete_task(&mut data, action(actor, &id)).unwrap_err();
            assert!(err.downcast_ref::<PermissionError>().is_some());
        }
        assert_eq!(data.task(&id).unwrap().status, TaskStatus::Pending);
    }

    #[test]
    fn test_pending_task_cannot_be_approved_or_rejected() {
        let (_env, mut data, service, id) = setup();

        let err = service.approve_task(&mut data, approve("mom", &id, 4.0)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskTransitionError>(),
            Some(TaskTransitionError::NotCompleted { current: TaskStatus::Pending })
        ));
        let err = service.reject_task(&mut data, action("mom", &id)).unwrap_err();
        assert!(err.downcast_ref::<TaskTransitionError>().is_some());

        assert_eq!(data.task(&id).unwrap().status, TaskStatus::Pending);
        assert_eq!(data.get_user("alice").unwrap().as_child().unwrap().points(), 0);
    }

    #[test]
    fn test_out_of_range_rating_changes_nothing() {
        let (_env, mut data, service, id) = setup();
        service.complete_task(&mut data, action("alice", &id)).unwrap();

        let err = service.approve_task(&mut data, approve("mom", &id, 5.5)).unwrap_err();
        assert_eq!(err.downcast_ref::<RatingError>(), Some(&RatingError::OutOfRange(5.5)));
        assert_eq!(data.task(&id).unwrap().status, TaskStatus::Completed);
        assert!(data.get_user("alice").unwrap().as_child().unwrap().ratings().is_empty());
    }

    #[test]
    fn test_reject_and_delete() {
        let (env, mut data, service, id) = setup();
        service.complete_task(&mut data, action("alice", &id)).unwrap();

        let err = service.reject_task(&mut data, action("alice", &id)).unwrap_err();
        assert!(err.downcast_ref::<PermissionError>().is_some());

        let rejected = service.reject_task(&mut data, action("mom", &id)).unwrap();
        assert_eq!(rejected.task.status, TaskStatus::Rejected);
        assert_eq!(data.get_user("alice").unwrap().as_child().unwrap().points(), 0);

        let err = service.approve_task(&mut data, approve("mom", &id, 4.0)).unwrap_err();
        assert!(err.downcast_ref::<TaskTransitionError>().is_some());

        let err = service.delete_task(&mut data, action("bob", &id)).unwrap_err();
        assert!(err.downcast_ref::<PermissionError>().is_some());

        service.delete_task(&mut data, action("mr_smith", &id)).unwrap();
        assert!(env.data_manager().tasks().is_empty());

        let err = service.delete_task(&mut data, action("mom", &id)).unwrap_err();
        assert_eq!(err.downcast_ref::<ValidationError>(), Some(&ValidationError::TaskNotFound(id)));
    }

    #[test]
    fn test_list_tasks_visibility() {
        let (_env, mut data, service, _id) = setup();
        service.create_task(&mut data, create("mr_smith", "bob")).unwrap();

        assert_eq!(service.list_tasks(&data, "alice").unwrap().tasks.len(), 1);
        assert_eq!(service.list_tasks(&data, "bob").unwrap().tasks.len(), 1);
        assert_eq!(service.list_tasks(&data, "mom").unwrap().tasks.len(), 2);
        assert_eq!(service.list_tasks(&data, "mr_smith").unwrap().tasks.len(), 2);
        assert!(service.list_tasks(&data, "ghost").is_err());
    }
}
