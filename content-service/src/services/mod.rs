pub mod database;
pub mod identity;
pub mod sessions;

pub use database::MongoDb;
pub use identity::{IdentityVerifier, TokenClaims};
pub use sessions::{MockSessionStore, RedisSessionStore, SessionRevocation};
