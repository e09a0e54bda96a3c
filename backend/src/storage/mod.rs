//! # Storage Module
//!
//! File persistence for users, tasks and wishes. Two interchangeable
//! backends implement the same traits: JSON (default) and CSV.

pub mod connection;
pub mod csv;
pub mod json;
pub mod records;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use connection::FileConnection;
pub use traits::{Connection, TaskStorage, UserStorage, WishStorage};
