// Infrastructure layer - External dependencies and adapters
pub mod activity_api;
pub mod config;
