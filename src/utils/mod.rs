//! Utility functions and helpers used throughout ionbrew

pub mod logging;
pub mod net;
