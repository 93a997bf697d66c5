//! Configuration management for ionbrew

pub mod serve_config;

pub use serve_config::*;
