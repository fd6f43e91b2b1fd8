pub mod app;
pub mod companion;
pub mod config;
pub mod error;
pub mod forum;
pub mod handlers;
pub mod membership;
pub mod models;
pub mod qr;
pub mod routes;

// Re-export key functions for convenience
pub use app::{create_app, init_tracing};
pub use companion::suggestion::{ParsedReply, SuggestedAction, parse_reply};
