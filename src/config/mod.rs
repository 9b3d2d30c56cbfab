/// Database configuration and connection management
pub mod database;

/// Seed data and media settings loaded from config.toml
pub mod catalog;
