//! # portalhub-entity
//!
//! Domain entity models for the PortalHub quota engine. Plan tiers and
//! their immutable definitions, the transient values produced by a quota
//! evaluation, and the in-app notification row used to deliver warnings.

pub mod notification;
pub mod plan;
pub mod quota;
