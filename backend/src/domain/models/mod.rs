pub mod task;
pub mod user;
pub mod wish;

pub use task::{Task, TaskStatus, TaskTransitionError};
pub use user::{ChildProfile, RatingError, User, UserKind, UserRole};
pub use wish::{Wish, WishStatus, WishTransitionError, WishType};
