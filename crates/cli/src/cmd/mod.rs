mod build;
mod info;
mod install;
mod locate;

pub use build::cmd_build;
pub use info::cmd_info;
pub use install::cmd_install;
pub use locate::cmd_locate;
