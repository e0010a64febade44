//! Extension declarations read from `extinstall.toml`.
//!
//! A manifest lists the native extensions a project builds and where each one
//! must be installed. Loading resolves every relative path against the
//! manifest's own directory, then [`Manifest::plan`] turns declarations into
//! runnable [`ExtensionPlan`]s with environment overrides applied.

mod plan;
mod types;

pub use plan::{ExtensionPlan, PlanOptions};
pub use types::*;
