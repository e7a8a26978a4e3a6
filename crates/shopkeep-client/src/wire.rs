//! Response envelopes used by the backend.
//!
//! The API is not uniform: identity lookups wrap their record in a keyed
//! object, the category list is a bare array, and the product list is
//! wrapped again. These types keep that knowledge out of the client methods.

use serde::Deserialize;
use shopkeep_core::{category::Category, identity::Identity, product::Product};

/// `GET api/auth/userInfo` → `{ "user": { .. } }`.
#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
  #[serde(default)]
  pub user: Option<Identity>,
}

/// `GET api/vendor-info` → `{ "vendor": { .. } }`.
#[derive(Debug, Deserialize)]
pub struct VendorEnvelope {
  #[serde(default)]
  pub vendor: Option<Identity>,
}

/// `POST api/categories` → `{ "category": { .. } }`.
#[derive(Debug, Deserialize)]
pub struct CategoryEnvelope {
  pub category: Category,
}

/// `GET api/product/products` → `{ "products": [ .. ] }`.
#[derive(Debug, Deserialize)]
pub struct ProductsEnvelope {
  #[serde(default)]
  pub products: Vec<Product>,
}

/// `GET api/website/{id}` → `{ "logoUrl": ".." }`.
#[derive(Debug, Deserialize)]
pub struct LogoEnvelope {
  #[serde(rename = "logoUrl", default)]
  pub logo_url: String,
}
