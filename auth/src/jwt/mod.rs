pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use claims::DEFAULT_TOKEN_TTL_HOURS;
pub use claims::MAX_TOKEN_TTL_HOURS;
pub use errors::JwtError;
pub use handler::JwtHandler;
