mod build;
mod targets;

pub use build::cmd_build;
pub use targets::cmd_targets;
