//! # portalhub-api
//!
//! HTTP API layer for the PortalHub quota engine built on Axum.
//!
//! Exposes quota checks, the usage overview, feature gates and the manual
//! rollup trigger, and maps [`portalhub_core::AppError`] onto HTTP statuses.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use state::AppState;
