// Application layer - Use cases and the ports they depend on
pub mod activity_repository;
pub mod aggregator;
pub mod dashboard_service;
