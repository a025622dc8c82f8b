//! Diesel/SQLite catalog storage: products, categories and the many-to-many
//! links between them.

pub mod config;
pub mod db;
pub mod domain;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod schema;
