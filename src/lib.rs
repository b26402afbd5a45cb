// Library root - layers are public so the binary and integration tests share them
pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
