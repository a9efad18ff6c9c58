//! Router - model selection for analyzed tasks
//!
//! This module maps a task classification to one of the configured model
//! roles and exposes [`TaskRouter`], the facade that ties analysis, routing
//! and usage tracking together.
//!
//! # Module Structure
//!
//! - `types`: Selection and export result types
//! - `router_impl`: TaskRouter implementation

mod router_impl;
mod types;

#[cfg(test)]
mod tests;

pub use router_impl::TaskRouter;
pub use types::{role_for, ExportedConfig, ModelSelection};
