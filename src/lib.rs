pub mod api;
pub mod config;
pub mod matching;
pub mod models;
pub mod transform;
pub mod workers;
