//! # portalhub-core
//!
//! Core crate for the PortalHub quota engine. Contains the unified error
//! system, configuration schemas, typed identifiers, the value types shared
//! with the persistence layer, and the traits every external collaborator
//! (usage source, plan assignments, notification delivery, clock) implements.
//!
//! This crate has **no** internal dependencies on other PortalHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
