//! Configuration loading

pub mod env_file;
pub mod settings;
