pub mod admin;

pub use admin::{admin_gate_middleware, CurrentIdentity};
