//! Persistence layer for dreamplan: connection pool, embedded migrations,
//! row models, and query functions for the `plans` and `analyses` tables.

pub mod config;
pub mod models;
pub mod pool;
pub mod queries;
