pub mod config;
pub mod models;
pub mod monitoring;
pub mod strategy;
pub mod meteora;
pub mod utils;
