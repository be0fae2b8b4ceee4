pub mod config;
pub mod effect;
pub mod types;
