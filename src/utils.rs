//! Ambient utilities: logging and configuration loading.

pub mod config;
pub mod logging;
