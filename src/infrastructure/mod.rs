//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where the dashboard reads its configuration and writes its trace
//! files on the current platform.

pub mod paths;

pub use paths::{data_dir, default_config_file, expand_tilde};
