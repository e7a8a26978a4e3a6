//! Core types and trait definitions for the Shopkeep catalog console.
//!
//! This crate is deliberately free of HTTP and terminal dependencies.
//! The client and TUI crates depend on it; it depends on nothing heavy.

pub mod api;
pub mod category;
pub mod error;
pub mod identity;
pub mod product;
pub mod session;
pub mod technology;

pub use error::{Error, Result};
