//! The delegate build step that runs before locate and install.
//!
//! The orchestrator only needs something it can invoke and that reports
//! success or failure. Compilation itself belongs to whatever implements
//! [`BuildStep`]:
//!
//! - [`CMakeBuild`] - configure and build a CMake project
//! - [`Prebuilt`] - the tree was produced elsewhere, nothing to run
//! - any `Fn() -> Result<(), BuildError>` closure

mod cmake;
mod step;

pub use cmake::CMakeBuild;
pub use step::{BuildError, BuildStep, Prebuilt, run_command};
