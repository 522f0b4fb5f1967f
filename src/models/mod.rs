// src/models/mod.rs

pub mod analytics;
pub mod attempt;
pub mod lenient;
pub mod question;
pub mod sourced;
pub mod student;
pub mod tutor;
