pub mod cache_aside;
pub mod entity;
pub mod versioning;

pub use cache_aside::CacheAside;
pub use entity::EntityState;
pub use versioning::{operations, ApiVersion, Operation};
