use anyhow::Result;
use log::{debug, info};
use std::path::PathBuf;

use super::{read_records, write_records, TASKS_FILE};
use crate::domain::models::Task;
use crate::storage::connection::FileConnection;
use crate::storage::records::{convert_records, TaskRecord};
use crate::storage::traits::TaskStorage;

/// CSV-backed task repository (`tasks.csv`)
#[derive(Debug, Clone)]
pub struct TaskRepository {
    connection: FileConnection,
}

impl TaskRepository {
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }

    fn tasks_file_path(&self) -> PathBuf {
        self.connection.file_path(TASKS_FILE)
    }
}

impl TaskStorage for TaskRepository {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        let path = self.tasks_file_path();
        let content = match self.connection.read_if_exists(&path)? {
            Some(content) => content,
            None => return Ok(Vec::new()),
        };

        let records: Vec<TaskRecord> = read_records(&content)?;
        let tasks = convert_records(records, "task");

        debug!("Loaded {} tasks from {:?}", tasks.len(), path);
        Ok(tasks)
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from).collect();
        let bytes = write_records(&records)?;

        let path = self.tasks_file_path();
        self.connection.write_atomic(&path, &bytes)?;

        info!("Saved {} tasks to {:?}", tasks.len(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::TestEnvironment;

    #[test]
    fn test_save_and_load_tasks() {
        let env = TestEnvironment::new().unwrap();
        let repo = TaskRepository::new(env.file_connection());

        let pending = Task::new("Dishes", "Wash, dry,\nput away", "2025-06-01", 10, "alice", "mom");
        let mut approved = Task::new("Homework", "Say \"done\"", "2025-06-02", 20, "alice", "mr_smith");
        approved.mark_completed().unwrap();
        approved.approve(Some(3.3)).unwrap();
        let tasks = vec![pending, approved];

        repo.save_tasks(&tasks).unwrap();
        assert_eq!(repo.load_tasks().unwrap(), tasks);
    }

    #[test]
    fn test_saving_nothing_loads_nothing() {
        let env = TestEnvironment::new().unwrap();
        let repo = TaskRepository::new(env.file_connection());
        repo.save_tasks(&[]).unwrap();
        assert!(repo.load_tasks().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let env = TestEnvironment::new().unwrap();
        std::fs::write(
            env.base_path.join(TASKS_FILE),
            "id,title,description,due_date,points,assigned_to,created_by,status,rating,completed_date\n\
             t1,Dishes,Wash,2025-06-01,lots,alice,mom,PENDING,,\n",
        )
        .unwrap();
        let repo = TaskRepository::new(env.file_connection());
        assert!(repo.load_tasks().is_err());
    }
}
