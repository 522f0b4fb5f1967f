// src/clients/mod.rs

//! Collaborators reached over HTTP: the test-data API and the generative model.

pub mod student_api;
pub mod tutor;

pub use student_api::{HttpStudentApi, StudentApi};
pub use tutor::{GenerativeTutor, TutorModel};
