//! The two command-line tools

pub mod autofix;
pub mod options;
pub mod status;
