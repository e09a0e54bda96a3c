//! Wishes: children ask, parents decide.
//!
//! A child only sees the wishes their level has unlocked. Teachers can read
//! every wish but cannot approve, reject or delete them.

use anyhow::Result;
use log::info;

use crate::domain::commands::wish::{CreateWishCommand, WishActionCommand, WishListResult, WishResult};
use crate::domain::data_manager::DataManager;
use crate::domain::errors::{PermissionError, ValidationError};
use crate::domain::models::user::{MAX_LEVEL, MIN_LEVEL};
use crate::domain::models::{User, UserKind, Wish};
use crate::domain::user_service::UserService;

#[derive(Debug, Clone, Default)]
pub struct WishService;

impl WishService {
    pub fn new() -> Self {
        Self
    }

    fn require_parent<'a>(
        data: &'a DataManager,
        username: &str,
        action: &'static str,
    ) -> Result<&'a User, PermissionError> {
        let user = UserService::require_user(data, username)?;
        if !matches!(user.kind, UserKind::Parent) {
            return Err(PermissionError::not_allowed(username, user.role(), action));
        }
        Ok(user)
    }

    pub fn create_wish(&self, data: &mut DataManager, command: CreateWishCommand) -> Result<WishResult> {
        let actor = UserService::require_user(data, &command.actor)?;
        if !actor.is_child() {
            return Err(PermissionError::not_allowed(&command.actor, actor.role(), "create wishes").into());
        }

        if command.title.trim().is_empty() {
            return Err(ValidationError::EmptyField("Title").into());
        }
        if command.description.trim().is_empty() {
            return Err(ValidationError::EmptyField("Description").into());
        }
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&command.required_level) {
            return Err(ValidationError::RequiredLevelOutOfRange(command.required_level).into());
        }

        let wish = Wish::new(
            command.title.trim(),
            command.description.trim(),
            command.wish_type,
            command.required_level,
            command.actor,
        );
        data.add_wish(wish.clone());
        data.save_wishes()?;

        info!(
            "{} wished for {} '{}' (level {})",
            wish.requested_by,
            wish.wish_type.as_str(),
            wish.title,
            wish.required_level
        );
        Ok(WishResult { wish })
    }

    pub fn approve_wish(&self, data: &mut DataManager, command: WishActionCommand) -> Result<WishResult> {
        Self::require_parent(data, &command.actor, "approve wishes")?;

        let wish = data
            .wish_mut(&command.wish_id)
            .ok_or_else(|| ValidationError::WishNotFound(command.wish_id.clone()))?;
        wish.approve(command.actor.as_str())?;
        let wish = wish.clone();
        data.save_wishes()?;

        info!("Wish {} approved by {}", wish.id, command.actor);
        Ok(WishResult { wish })
    }

    pub fn reject_wish(&self, data: &mut DataManager, command: WishActionCommand) -> Result<WishResult> {
        Self::require_parent(data, &command.actor, "reject wishes")?;

        let wish = data
            .wish_mut(&command.wish_id)
            .ok_or_else(|| ValidationError::WishNotFound(command.wish_id.clone()))?;
        wish.reject()?;
        let wish = wish.clone();
        data.save_wishes()?;

        info!("Wish {} rejected by {}", wish.id, command.actor);
        Ok(WishResult { wish })
    }

    /// The requesting child or any parent may delete a wish
    pub fn delete_wish(&self, data: &mut DataManager, command: WishActionCommand) -> Result<WishResult> {
        let actor = UserService::require_user(data, &command.actor)?;
        let wish = data
            .wish(&command.wish_id)
            .ok_or_else(|| ValidationError::WishNotFound(command.wish_id.clone()))?;
        let allowed = matches!(actor.kind, UserKind::Parent) || wish.requested_by == actor.username;
        if !allowed {
            return Err(PermissionError::not_allowed(&command.actor, actor.role(), "delete this wish").into());
        }

        let wish = data
            .remove_wish(&command.wish_id)
            .ok_or_else(|| ValidationError::WishNotFound(command.wish_id.clone()))?;
        data.save_wishes()?;

        info!("Wish {} deleted by {}", wish.id, command.actor);
        Ok(WishResult { wish })
    }

    /// A child's own wishes up to their level; everything for parents and teachers
    pub fn list_wishes(&self, data: &DataManager, username: &str) -> Result<WishListResult> {
        let user = UserService::require_user(data, username)?;
        let wishes = match user.as_child() {
            Some(child) => data
                .wishes_for_child(username, child.level())
                .into_iter()
                .cloned()
                .collect(),
            None => data.wishes().to_vec(),
        };
        Ok(WishListResult { wishes })
    }
}
