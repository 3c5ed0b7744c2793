//! SQLite-backed storage for users and categories.
//! Used by: state, handlers.

pub mod category;
pub mod sqlite;
pub mod user;
