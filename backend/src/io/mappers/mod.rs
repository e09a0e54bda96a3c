pub mod task_mapper;
pub mod user_mapper;
pub mod wish_mapper;

pub use task_mapper::TaskMapper;
pub use user_mapper::UserMapper;
pub use wish_mapper::WishMapper;
