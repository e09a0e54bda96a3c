//! In-memory owner of every user, task and wish.
//!
//! Collections are loaded once at startup and written back in full by the
//! save methods. Lookups hand out `&mut` references so callers change
//! entities in place and then save the affected collection.

use anyhow::Result;
use log::{debug, error, info};
use std::collections::BTreeMap;

use crate::domain::errors::RegistrationError;
use crate::domain::models::{Task, User, Wish};
use crate::storage::traits::{Connection, TaskStorage, UserStorage, WishStorage};

pub struct DataManager {
    user_storage: Box<dyn UserStorage>,
    task_storage: Box<dyn TaskStorage>,
    wish_storage: Box<dyn WishStorage>,
    users: BTreeMap<String, User>,
    tasks: Vec<Task>,
    wishes: Vec<Wish>,
}

impl DataManager {
    /// Create an empty manager; call [`DataManager::load`] to read the files
    pub fn new(
        user_storage: Box<dyn UserStorage>,
        task_storage: Box<dyn TaskStorage>,
        wish_storage: Box<dyn WishStorage>,
    ) -> Self {
        Self {
            user_storage,
            task_storage,
            wish_storage,
            users: BTreeMap::new(),
            tasks: Vec::new(),
            wishes: Vec::new(),
        }
    }

    pub fn from_connection<C: Connection>(connection: &C) -> Self {
        Self::new(
            Box::new(connection.create_user_repository()),
            Box::new(connection.create_task_repository()),
            Box::new(connection.create_wish_repository()),
        )
    }

    /// Replace the in-memory collections with what is on disk.
    ///
    /// A collection that fails to load is logged and left empty; the other
    /// collections still load.
    pub fn load(&mut self) {
        self.users = match self.user_storage.load_users() {
            Ok(users) => {
                let mut by_name = BTreeMap::new();
                for user in users {
                    if by_name.contains_key(&user.username) {
                        error!("Duplicate user '{}' in storage, keeping the last one", user.username);
                    }
                    by_name.insert(user.username.clone(), user);
                }
                by_name
            }
            Err(e) => {
                error!("Error loading users: {:#}", e);
                BTreeMap::new()
            }
        };

        self.tasks = self.task_storage.load_tasks().unwrap_or_else(|e| {
            error!("Error loading tasks: {:#}", e);
            Vec::new()
        });

        self.wishes = self.wish_storage.load_wishes().unwrap_or_else(|e| {
            error!("Error loading wishes: {:#}", e);
            Vec::new()
        });

        info!(
            "Loaded {} users, {} tasks, {} wishes",
            self.users.len(),
            self.tasks.len(),
            self.wishes.len()
        );
    }

    /// Write all three collections
    pub fn save(&self) -> Result<()> {
        self.save_users()?;
        self.save_tasks()?;
        self.save_wishes()?;
        Ok(())
    }

    pub fn save_users(&self) -> Result<()> {
        let users: Vec<User> = self.users.values().cloned().collect();
        self.user_storage.save_users(&users)
    }

    pub fn save_tasks(&self) -> Result<()> {
        self.task_storage.save_tasks(&self.tasks)
    }

    pub fn save_wishes(&self) -> Result<()> {
        self.wish_storage.save_wishes(&self.wishes)
    }

    // Users

    /// Add a user; usernames are unique
    pub fn add_user(&mut self, user: User) -> Result<(), RegistrationError> {
        if self.users.contains_key(&user.username) {
            return Err(RegistrationError::DuplicateUsername(user.username));
        }
        debug!("Adding user {} ({})", user.username, user.role().as_str());
        self.users.insert(user.username.clone(), user);
        Ok(())
    }

    pub fn get_user(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    pub fn get_user_mut(&mut self, username: &str) -> Option<&mut User> {
        self.users.get_mut(username)
    }

    /// The user with this username, if the password matches exactly
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&User> {
        self.users
            .get(username)
            .filter(|user| user.authenticate(password))
    }

    /// All users ordered by username
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// All children ordered by username
    pub fn children(&self) -> Vec<&User> {
        self.users.values().filter(|user| user.is_child()).collect()
    }

    // Tasks

    pub fn add_task(&mut self, task: Task) {
        debug!("Adding task {} for {}", task.id, task.assigned_to);
        self.tasks.push(task);
    }

    /// Remove a task by id, returning it if it existed
    pub fn remove_task(&mut self, task_id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == task_id)?;
        Some(self.tasks.remove(index))
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn tasks_for_child(&self, child_username: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.is_assigned_to(child_username))
            .collect()
    }

    // Wishes

    pub fn add_wish(&mut self, wish: Wish) {
        debug!("Adding wish {} for {}", wish.id, wish.requested_by);
        self.wishes.push(wish);
    }

    pub fn remove_wish(&mut self, wish_id: &str) -> Option<Wish> {
        let index = self.wishes.iter().position(|wish| wish.id == wish_id)?;
        Some(self.wishes.remove(index))
    }

    pub fn wish(&self, wish_id: &str) -> Option<&Wish> {
        self.wishes.iter().find(|wish| wish.id == wish_id)
    }

    pub fn wish_mut(&mut self, wish_id: &str) -> Option<&mut Wish> {
        self.wishes.iter_mut().find(|wish| wish.id == wish_id)
    }

    pub fn wishes(&self) -> &[Wish] {
        &self.wishes
    }

    /// Wishes requested by this child that the given level unlocks
    pub fn wishes_for_child(&self, child_username: &str, child_level: u8) -> Vec<&Wish> {
        self.wishes
            .iter()
            .filter(|wish| {
                wish.requested_by == child_username && wish.is_available_for_level(child_level)
            })
            .collect()
    }
}
