pub mod api;
pub mod dto;
pub mod filter;
pub mod format;
pub mod model;
