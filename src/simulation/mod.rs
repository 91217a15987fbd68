pub mod config;
pub mod engine;
pub mod series;
pub mod summary;
