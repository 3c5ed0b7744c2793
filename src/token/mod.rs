//! Access token issuance and verification.
//! Used by: handlers, middleware, state.

pub mod authority;
pub mod claims;
pub mod sign;
pub mod verify;
