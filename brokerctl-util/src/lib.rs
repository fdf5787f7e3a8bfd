pub mod config;
pub mod dirs;
pub mod http;
pub mod json;
pub mod types;
