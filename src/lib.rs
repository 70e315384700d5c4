//! Tracked-vessel table and custom field store

pub mod client;
pub mod config;
pub mod database;
pub mod errors;
pub mod formatter;
pub mod models;
pub mod table;
