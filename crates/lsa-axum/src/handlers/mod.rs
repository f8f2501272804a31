//! HTTP request handlers.

pub mod health;
pub mod models;
pub mod root;
