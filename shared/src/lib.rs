//! Shared types and models for the Maize Advisor Platform
//!
//! This crate contains the domain models, agronomic classification rules,
//! and GeoJSON coordinate handling shared between the backend and its tests.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
