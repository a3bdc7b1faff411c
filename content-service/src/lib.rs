pub mod access;
pub mod config;
pub mod dtos;
pub mod handlers;
pub mod listing;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

pub use startup::{build_router, build_state, AppState};
