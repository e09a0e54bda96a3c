//! # Storage Traits
//!
//! Storage abstraction used by the data manager. Each collection is loaded
//! and saved as a whole; there are no partial updates.

use anyhow::Result;

use crate::domain::models::{Task, User, Wish};

/// Whole-collection persistence for users
pub trait UserStorage: Send + Sync {
    /// Load every user. A missing file is an empty collection.
    fn load_users(&self) -> Result<Vec<User>>;

    /// Replace the stored users with `users`
    fn save_users(&self, users: &[User]) -> Result<()>;
}

/// Whole-collection persistence for tasks
pub trait TaskStorage: Send + Sync {
    fn load_tasks(&self) -> Result<Vec<Task>>;

    fn save_tasks(&self, tasks: &[Task]) -> Result<()>;
}

/// Whole-collection persistence for wishes
pub trait WishStorage: Send + Sync {
    fn load_wishes(&self) -> Result<Vec<Wish>>;

    fn save_wishes(&self, wishes: &[Wish]) -> Result<()>;
}

/// Trait defining the interface for storage connections
///
/// A connection knows where the data lives and creates the repositories for
/// its file format, so the domain layer never sees paths or formats.
pub trait Connection: Send + Sync + Clone {
    type UserRepository: UserStorage + 'static;
    type TaskRepository: TaskStorage + 'static;
    type WishRepository: WishStorage + 'static;

    fn create_user_repository(&self) -> Self::UserRepository;

    fn create_task_repository(&self) -> Self::TaskRepository;

    fn create_wish_repository(&self) -> Self::WishRepository;
}
