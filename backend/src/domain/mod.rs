//! # Domain Module
//!
//! Business logic for student records. Field rules themselves live in
//! `shared::validation` so the browser applies exactly the same checks;
//! this layer adds the rules that need the collection: ID uniqueness on
//! create, existence on delete, and query filtering.
//!
//! ## Module Organization
//!
//! - **student_service**: create, list/filter and delete operations

pub mod student_service;

pub use student_service::{
    StudentFilter, StudentListing, StudentResult, StudentService, StudentServiceError,
};
