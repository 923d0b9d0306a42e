//! config/mod.rs

pub mod watch_config;
