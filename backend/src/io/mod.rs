//! # IO Module
//!
//! Interface layer between the browser and the domain logic. Translates HTTP
//! requests into service calls and service results into JSON responses.

pub mod rest;

pub use rest::api_router;
