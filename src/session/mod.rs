// Public API - what other modules can use
pub use handlers::create_session;
pub use types::{SessionClaims, SessionResponse};

// Internal modules
mod generators;
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
mod token;
mod types;
