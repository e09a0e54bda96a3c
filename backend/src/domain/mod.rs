//! # Domain Module
//!
//! Business rules for KidTask: users and their roles, the task and wish
//! lifecycles, and how ratings turn into levels.
//!
//! ## Module Organization
//!
//! - **models**: Users, tasks and wishes with their state machines
//! - **data_manager**: In-memory collections backed by a storage connection
//! - **user_service**: Registration and login
//! - **task_service**: Task assignment, completion and review
//! - **wish_service**: Wish requests and parental decisions
//! - **progress_service**: Per-child progress reports
//!
//! ## Business Rules
//!
//! - Usernames are unique
//! - Tasks move PENDING -> COMPLETED -> APPROVED | REJECTED
//! - Wishes move PENDING -> APPROVED | REJECTED
//! - A child's level is floor(mean rating) + 1, clamped to 1..=5

pub mod commands;
pub mod data_manager;
pub mod errors;
pub mod models;
pub mod progress_service;
pub mod task_service;
pub mod user_service;
pub mod wish_service;

pub use data_manager::DataManager;
pub use errors::{AuthError, PermissionError, RegistrationError, ValidationError};
pub use progress_service::ProgressService;
pub use task_service::TaskService;
pub use user_service::UserService;
pub use wish_service::WishService;
