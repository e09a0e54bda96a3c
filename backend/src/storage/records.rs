//! Flat on-disk records and their conversions to domain models.
//!
//! Both file backends persist these records, so a data directory written in
//! one format carries exactly the same fields as the other.

use anyhow::Result;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::domain::models::user::{validate_rating, MAX_LEVEL, MIN_LEVEL};
use crate::domain::models::{
    ChildProfile, Task, TaskStatus, User, UserKind, UserRole, Wish, WishStatus, WishType,
};

/// User record. Child-only fields are absent for parents and teachers.
///
/// Numbers are read wide and range-checked on conversion, so one bad child
/// is skipped instead of failing the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Vec<f64>>,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        let (points, level, ratings) = match &user.kind {
            UserKind::Child(child) => (
                Some(i64::from(child.points())),
                Some(i64::from(child.level())),
                Some(child.ratings().to_vec()),
            ),
            UserKind::Parent | UserKind::Teacher => (None, None, None),
        };
        UserRecord {
            username: user.username.clone(),
            password: user.password.clone(),
            role: user.role().as_str().to_string(),
            points,
            level,
            ratings,
        }
    }
}

impl TryFrom<UserRecord> for User {
    type Error = anyhow::Error;

    fn try_from(record: UserRecord) -> Result<Self> {
        let role = UserRole::from_string(&record.role).map_err(|e| anyhow::anyhow!(e))?;
        let kind = match role {
            UserRole::Child => {
                let ratings = record.ratings.unwrap_or_default();
                let points = record.points.unwrap_or(0);
                let points = u32::try_from(points)
                    .map_err(|_| anyhow::anyhow!("Points out of range: {}", points))?;
                // Out-of-range levels saturate into u8 so restore reports them
                let level = record
                    .level
                    .map(|level| level.clamp(0, i64::from(u8::MAX)) as u8)
                    .unwrap_or(MIN_LEVEL);
                let profile = ChildProfile::restore(points, level, &ratings)?;
                UserKind::Child(profile)
            }
            UserRole::Parent => UserKind::Parent,
            UserRole::Teacher => UserKind::Teacher,
        };
        Ok(User {
            username: record.username,
            password: record.password,
            kind,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub points: u32,
    pub assigned_to: String,
    pub created_by: String,
    pub status: String,
    pub rating: Option<f64>,
    pub completed_date: Option<String>,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        TaskRecord {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date.clone(),
            points: task.points,
            assigned_to: task.assigned_to.clone(),
            created_by: task.created_by.clone(),
            status: task.status.as_str().to_string(),
            rating: task.rating,
            completed_date: task.completed_date.clone(),
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = anyhow::Error;

    fn try_from(record: TaskRecord) -> Result<Self> {
        let status = TaskStatus::from_string(&record.status)
            .map_err(|e| anyhow::anyhow!("Failed to parse task status: {}", e))?;
        let rating = record.rating.map(validate_rating).transpose()?;
        Ok(Task {
            id: record.id,
            title: record.title,
            description: record.description,
            due_date: record.due_date,
            points: record.points,
            assigned_to: record.assigned_to,
            created_by: record.created_by,
            status,
            rating,
            completed_date: record.completed_date,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub wish_type: String,
    pub required_level: u8,
    pub requested_by: String,
    pub status: String,
    pub approved_by: Option<String>,
}

impl From<&Wish> for WishRecord {
    fn from(wish: &Wish) -> Self {
        WishRecord {
            id: wish.id.clone(),
            title: wish.title.clone(),
            description: wish.description.clone(),
            wish_type: wish.wish_type.as_str().to_string(),
            required_level: wish.required_level,
            requested_by: wish.requested_by.clone(),
            status: wish.status.as_str().to_string(),
            approved_by: wish.approved_by.clone(),
        }
    }
}

impl TryFrom<WishRecord> for Wish {
    type Error = anyhow::Error;

    fn try_from(record: WishRecord) -> Result<Self> {
        let wish_type = WishType::from_string(&record.wish_type).map_err(|e| anyhow::anyhow!(e))?;
        let status = WishStatus::from_string(&record.status).map_err(|e| anyhow::anyhow!(e))?;
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&record.required_level) {
            return Err(anyhow::anyhow!(
                "Required level must be between {} and {}, got {}",
                MIN_LEVEL,
                MAX_LEVEL,
                record.required_level
            ));
        }
        Ok(Wish {
            id: record.id,
            title: record.title,
            description: record.description,
            wish_type,
            required_level: record.required_level,
            requested_by: record.requested_by,
            status,
            approved_by: record.approved_by,
        })
    }
}

/// Convert records to domain models, skipping (and logging) any record that
/// does not describe a valid entity.
pub fn convert_records<R, T>(records: Vec<R>, kind: &str) -> Vec<T>
where
    T: TryFrom<R, Error = anyhow::Error>,
{
    let total = records.len();
    let converted: Vec<T> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match T::try_from(record) {
            Ok(entity) => Some(entity),
            Err(e) => {
                warn!("Skipping invalid {} record #{}: {}", kind, index + 1, e);
                None
            }
        })
        .collect();
    if converted.len() != total {
        warn!("Loaded {} of {} {} records", converted.len(), total, kind);
    }
    converted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_record_has_no_child_fields() {
        let parent = User::new("mom", "pw", UserRole::Parent);
        let record = UserRecord::from(&parent);
        assert_eq!(record.role, "PARENT");
        assert!(record.points.is_none());
        assert!(record.level.is_none());
        assert!(record.ratings.is_none());
    }

    #[test]
    fn test_child_record_replays_ratings() {
        let record = UserRecord {
            username: "alice".to_string(),
            password: "pw".to_string(),
            role: "child".to_string(),
            points: Some(25),
            level: Some(1),
            ratings: Some(vec![4.0, 4.0]),
        };
        let user = User::try_from(record).unwrap();
        let child = user.as_child().unwrap();
        assert_eq!(child.points(), 25);
        assert_eq!(child.level(), 5);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let record = UserRecord {
            username: "x".to_string(),
            password: "pw".to_string(),
            role: "ADMIN".to_string(),
            points: None,
            level: None,
            ratings: None,
        };
        assert!(User::try_from(record).is_err());
    }

    #[test]
    fn test_convert_records_skips_invalid() {
        let good = TaskRecord::from(&Task::new("a", "b", "c", 1, "alice", "mom"));
        let mut bad = good.clone();
        bad.status = "DONE".to_string();
        let tasks: Vec<Task> = convert_records(vec![good.clone(), bad], "task");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, good.id);
    }

    #[test]
    fn test_task_rating_out_of_range_is_rejected() {
        let mut task = Task::new("a", "b", "c", 1, "alice", "mom");
        task.mark_completed().unwrap();
        task.approve(Some(4.0)).unwrap();
        let mut record = TaskRecord::from(&task);
        assert!(Task::try_from(record.clone()).is_ok());

        record.rating = Some(9.0);
        assert!(Task::try_from(record.clone()).is_err());
        record.rating = Some(f64::NAN);
        assert!(Task::try_from(record).is_err());
    }

    #[test]
    fn test_wish_required_level_out_of_range_is_rejected() {
        let mut record = WishRecord::from(&Wish::new("Zoo", "", WishType::Activity, 1, "alice"));
        for level in [0, 6, 255] {
            record.required_level = level;
            assert!(Wish::try_from(record.clone()).is_err());
        }
    }

    fn child_record(points: Option<i64>, level: Option<i64>, ratings: Option<Vec<f64>>) -> UserRecord {
        UserRecord {
            username: "alice".to_string(),
            password: "pw".to_string(),
            role: "CHILD".to_string(),
            points,
            level,
            ratings,
        }
    }

    #[test]
    fn test_child_numbers_out_of_range_are_rejected() {
        assert!(User::try_from(child_record(Some(-5), Some(1), None)).is_err());
        assert!(User::try_from(child_record(Some(i64::from(u32::MAX) + 1), Some(1), None)).is_err());
        assert!(User::try_from(child_record(Some(0), Some(300), None)).is_err());
        assert!(User::try_from(child_record(Some(0), Some(-1), None)).is_err());
    }

    #[test]
    fn test_bad_stored_level_is_ignored_when_ratings_exist() {
        let user = User::try_from(child_record(Some(3), Some(300), Some(vec![2.0]))).unwrap();
        assert_eq!(user.as_child().unwrap().level(), 3);
    }

    #[test]
    fn test_wish_record_conversion() {
        let mut wish = Wish::new("Zoo", "Trip to the zoo", WishType::Activity, 2, "alice");
        wish.approve("dad").unwrap();
        let record = WishRecord::from(&wish);
        assert_eq!(record.wish_type, "activity");
        assert_eq!(record.status, "APPROVED");
        assert_eq!(Wish::try_from(record).unwrap(), wish);
    }
}
