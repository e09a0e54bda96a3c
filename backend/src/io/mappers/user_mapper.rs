use shared::UserProfile;

use crate::domain::models::User;

pub struct UserMapper;

impl UserMapper {
    /// Convert a domain User to its public profile; the password is dropped
    pub fn to_dto(user: &User) -> UserProfile {
        let child = user.as_child();
        UserProfile {
            username: user.username.clone(),
            role: user.role().as_str().to_string(),
            points: child.map(|c| c.points()),
            level: child.map(|c| c.level()),
        }
    }

    pub fn to_dto_list<'a>(users: impl IntoIterator<Item = &'a User>) -> Vec<UserProfile> {
        users.into_iter().map(Self::to_dto).collect()
    }
}
