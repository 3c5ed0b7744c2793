//! HTTP handler modules.
//! Used by: server.

pub mod auth;
pub mod category;
pub mod health;
