pub mod config;
pub mod events;
pub mod tracing;
pub mod views;
