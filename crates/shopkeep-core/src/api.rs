//! The `CatalogApi` trait — the seam between drafts/session and the backend.
//!
//! The trait is implemented by transport backends (`shopkeep-client` over
//! HTTP). The session and the TUI depend on this abstraction, not on any
//! concrete client, which also makes both testable against stubs.

use std::future::Future;

use crate::{
  category::{Category, CategoryId, CategoryPayload, QuickCategoryPayload},
  identity::{Identity, WebsiteId},
  product::{Product, ProductId, ProductPayload},
};

/// Abstraction over the catalog backend.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait CatalogApi: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Bootstrap ─────────────────────────────────────────────────────────

  /// Resolve the session token as an end user. `Ok(None)` means the token
  /// is valid but does not map to an end-user record.
  fn user_info(
    &self,
  ) -> impl Future<Output = Result<Option<Identity>, Self::Error>> + Send + '_;

  /// Resolve the session token as a vendor; the fallback lookup.
  fn vendor_info(
    &self,
  ) -> impl Future<Output = Result<Option<Identity>, Self::Error>> + Send + '_;

  /// The full category list for the session's storefront.
  fn categories(
    &self,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;

  /// Display logo URL for a storefront website.
  fn logo_url<'a>(
    &'a self,
    website: &'a WebsiteId,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;

  // ── Catalog reads ─────────────────────────────────────────────────────

  /// All products visible to the session.
  fn products(
    &self,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + '_;

  // ── Catalog writes ────────────────────────────────────────────────────

  /// Create a category from the category editor; returns the stored record.
  fn create_category<'a>(
    &'a self,
    payload: &'a CategoryPayload,
  ) -> impl Future<Output = Result<Category, Self::Error>> + Send + 'a;

  /// Update an existing category in place.
  fn update_category<'a>(
    &'a self,
    id: &'a CategoryId,
    payload: &'a CategoryPayload,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Create a category from the quick-add flow; returns the stored record
  /// so callers can append it to their in-memory list without a reload.
  fn quick_add_category<'a>(
    &'a self,
    payload: &'a QuickCategoryPayload,
  ) -> impl Future<Output = Result<Category, Self::Error>> + Send + 'a;

  /// Create a product.
  fn create_product<'a>(
    &'a self,
    payload: &'a ProductPayload,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Update an existing product in place.
  fn update_product<'a>(
    &'a self,
    id: &'a ProductId,
    payload: &'a ProductPayload,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
