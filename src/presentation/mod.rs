// Presentation layer - HTTP handlers, templates and view helpers
pub mod app_state;
pub mod chart;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod pagination;
pub mod routes;
pub mod templates;
