// src/handlers/mod.rs

pub mod analytics;
pub mod health;
pub mod leaderboard;
pub mod profile;
pub mod tutor;
