//! API handlers for the admin gate.

pub mod admin;
pub mod health;
pub mod root;
