//! Static plan catalog.

pub mod catalog;

pub use catalog::PlanCatalog;
