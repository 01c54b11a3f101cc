pub mod post;
pub mod product;
pub mod store;
pub mod user;

pub use post::PostgresPostRepository;
pub use product::PostgresProductRepository;
pub use store::PostgresStore;
pub use user::PostgresUserRepository;
