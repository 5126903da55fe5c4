//! Operator handlers.

pub mod rollups;
