//! deploywatch
//!
//! Polls the Vercel API for the latest deployment of a project, reports its
//! build status and pulls error lines out of failed build logs.

pub mod app;
pub mod config;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod models;
pub mod report;
pub mod scanner;
pub mod workers;
