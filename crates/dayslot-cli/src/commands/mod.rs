pub mod auth;
pub mod config;
pub mod export;
pub mod plan;
pub mod sync;
