// src/lib.rs

pub mod analytics;
pub mod clients;
pub mod config;
pub mod error;
pub mod fallback;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

// Re-export specific items for convenience if needed
pub use analytics::{aggregate, match_topic, normalize_subject, topic_detail};
pub use routes::create_router;
