//! Vercel REST API access

pub mod api;
pub mod client;
pub mod vercel;

pub use api::DeploymentApi;
pub use client::HttpClient;
