//! Request handlers, one module per route group

pub mod auth;
pub mod clients;
pub mod admin;
pub mod health;
