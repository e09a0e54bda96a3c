use shared::WishView;

use crate::domain::models::Wish;

pub struct WishMapper;

impl WishMapper {
    pub fn to_dto(wish: &Wish) -> WishView {
        WishView {
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

    pub fn to_dto_list<'a>(wishes: impl IntoIterator<Item = &'a Wish>) -> Vec<WishView> {
        wishes.into_iter().map(Self::to_dto).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::WishType;

    #[test]
    fn test_wish_view() {
        let mut wish = Wish::new("Zoo", "Lions", WishType::Activity, 2, "alice");
        wish.approve("mom").unwrap();
        let view = WishMapper::to_dto(&wish);
        assert_eq!(view.wish_type, "activity");
        assert_eq!(view.status, "APPROVED");
        assert_eq!(view.approved_by.as_deref(), Some("mom"));
        assert_eq!(view.required_level, 2);
    }
}
