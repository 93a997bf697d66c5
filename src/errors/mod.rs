//! Error types for ionbrew

pub mod types;

pub use types::*;
