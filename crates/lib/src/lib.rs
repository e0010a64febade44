//! extinstall-lib: locate and install compiled extension modules
//!
//! This crate provides the pieces of the post-build install step:
//! - `artifact`: describing, locating and installing a compiled artifact
//! - `build`: the delegate build step, including the CMake driver
//! - `orchestrate`: the build → locate → install pipeline
//! - `manifest`: extension declarations read from `extinstall.toml`

pub mod artifact;
pub mod build;
pub mod consts;
pub mod manifest;
pub mod orchestrate;
pub mod platform;
pub mod util;
