//! # IO Module
//!
//! Translates domain types into the DTOs of the `shared` crate. Nothing in
//! here touches storage or enforces business rules.

pub mod mappers;

pub use mappers::{TaskMapper, UserMapper, WishMapper};
