//! HTTP backend for the Shopkeep catalog console.
//!
//! Implements [`shopkeep_core::api::CatalogApi`] over the REST endpoints of
//! the storefront backend, including its assorted response envelopes.

mod client;
mod wire;

pub mod error;

pub use client::{CatalogClient, ClientConfig};
pub use error::{Error, Result};

#[cfg(test)]
mod tests;
