pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod prompt;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};
