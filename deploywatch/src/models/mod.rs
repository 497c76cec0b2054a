//! API data models

pub mod deployment;
pub mod event;
