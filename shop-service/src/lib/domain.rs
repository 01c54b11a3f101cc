pub mod page;
pub mod post;
pub mod product;
pub mod user;
