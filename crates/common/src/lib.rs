//! Shared error plumbing used across the skilldoc crates.

pub mod error;

pub use error::FromMessage;
