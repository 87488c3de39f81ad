//! Ringside Server - Axum surface for the ranking engine and commands.

pub mod config;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::create_router;
pub use state::AppState;
