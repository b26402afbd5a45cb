// Domain layer - Plain data types, no I/O
pub mod activity;
pub mod dashboard;
pub mod error;
