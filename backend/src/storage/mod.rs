//! # Storage Module
//!
//! Handles persistence of student records.
//!
//! The domain layer only sees the `StudentStorage` trait. The store is created
//! once at startup and handed to the services that need it, so tests can build
//! an isolated store per case.
//!
//! ## Current Implementation
//!
//! - **InMemoryStudentStore**: records kept in a `RwLock<Vec<_>>`, insertion ordered

pub mod memory;
pub mod traits;

pub use memory::InMemoryStudentStore;
pub use traits::{InsertOutcome, StudentStorage};
