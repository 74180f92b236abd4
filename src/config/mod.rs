/// Business identity and console settings from config.toml
pub mod business;

/// Database configuration and connection management
pub mod database;

/// Operator passcode configuration from environment variables
pub mod operators;
