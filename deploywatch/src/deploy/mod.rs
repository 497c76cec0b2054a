//! Deployment triggers

pub mod git;
