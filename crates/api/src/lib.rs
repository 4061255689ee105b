//! HTTP API: the product submission endpoint, its routing and configuration.

pub mod app;
pub mod config;
pub mod middleware;

pub use config::ApiConfig;
