//! Command and result types consumed by the services.
//!
//! Every command names the acting user; the service resolves that user and
//! checks the role before touching any data.

pub mod user {
    use crate::domain::models::{User, UserRole};

    /// Input for registering a new account.
    #[derive(Debug, Clone)]
    pub struct RegisterCommand {
        pub username: String,
        pub password: String,
        pub role: UserRole,
    }

    #[derive(Debug, Clone)]
    pub struct LoginCommand {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Clone)]
    pub struct RegisterResult {
        pub user: User,
    }

    #[derive(Debug, Clone)]
    pub struct LoginResult {
        pub user: User,
    }
}

pub mod task {
    use crate::domain::models::Task;

    /// Input for creating a task. `actor` must be a parent or teacher.
    #[derive(Debug, Clone)]
    pub struct CreateTaskCommand {
        pub actor: String,
        pub title: String,
        pub description: String,
        pub due_date: String,
        pub points: u32,
        pub assigned_to: String,
    }

    /// Complete, reject or delete a task
    #[derive(Debug, Clone)]
    pub struct TaskActionCommand {
        pub actor: String,
        pub task_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct ApproveTaskCommand {
        pub actor: String,
        pub task_id: String,
        pub rating: f64,
    }

    #[derive(Debug, Clone)]
    pub struct TaskResult {
        pub task: Task,
    }

    /// Result of approving a task, including the child's state afterwards.
    #[derive(Debug, Clone)]
    pub struct ApproveTaskResult {
        pub task: Task,
        pub child_points: u32,
        pub child_level: u8,
    }

    #[derive(Debug, Clone)]
    pub struct TaskListResult {
        pub tasks: Vec<Task>,
    }
}

pub mod wish {
    use crate::domain::models::{Wish, WishType};

    /// Input for creating a wish. `actor` must be a child.
    #[derive(Debug, Clone)]
    pub struct CreateWishCommand {
        pub actor: String,
        pub title: String,
        pub description: String,
        pub wish_type: WishType,
        pub required_level: u8,
    }

    /// Approve, reject or delete a wish
    #[derive(Debug, Clone)]
    pub struct WishActionCommand {
        pub actor: String,
        pub wish_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct WishResult {
        pub wish: Wish,
    }

    #[derive(Debug, Clone)]
    pub struct WishListResult {
        pub wishes: Vec<Wish>,
    }
}
