//! [`CatalogClient`] — the reqwest implementation of [`CatalogApi`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};

use shopkeep_core::{
  api::CatalogApi,
  category::{Category, CategoryId, CategoryPayload, QuickCategoryPayload},
  identity::{Identity, WebsiteId},
  product::{Product, ProductId, ProductPayload},
};

use crate::{
  error::{Error, Result},
  wire::{
    CategoryEnvelope, LogoEnvelope, ProductsEnvelope, UserEnvelope,
    VendorEnvelope,
  },
};

// ─── Client ──────────────────────────────────────────────────────────────────

/// Connection settings for the catalog backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub base_url: String,
  /// Session bearer token. No `Authorization` header is sent when empty.
  pub token: String,
}

/// Async HTTP client for the catalog JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct CatalogClient {
  client: Client,
  config: ClientConfig,
}

impl CatalogClient {
  pub fn new(config: ClientConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  /// Whether a session token is configured at all.
  pub fn has_token(&self) -> bool {
    !self.config.token.is_empty()
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    if self.config.token.is_empty() {
      req
    } else {
      req.bearer_auth(&self.config.token)
    }
  }

  // ── Request helpers ───────────────────────────────────────────────────────

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let resp = self.auth(self.client.get(self.url(path))).send().await?;
    if !resp.status().is_success() {
      return Err(Error::Status {
        method: "GET",
        path: path.to_owned(),
        status: resp.status(),
      });
    }
    Ok(resp.json().await?)
  }

  async fn post_json<B: Serialize, T: DeserializeOwned>(
    &self,
    path: &str,
    body: &B,
  ) -> Result<T> {
    let resp = self
      .auth(self.client.post(self.url(path)).json(body))
      .send()
      .await?;
    if !resp.status().is_success() {
      return Err(Error::Status {
        method: "POST",
        path: path.to_owned(),
        status: resp.status(),
      });
    }
    Ok(resp.json().await?)
  }

  /// POST where only the status matters; the body is not decoded.
  async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
    let resp = self
      .auth(self.client.post(self.url(path)).json(body))
      .send()
      .await?;
    if !resp.status().is_success() {
      return Err(Error::Status {
        method: "POST",
        path: path.to_owned(),
        status: resp.status(),
      });
    }
    Ok(())
  }

  /// PUT where only the status matters; the body is not decoded.
  async fn put_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
    let resp = self
      .auth(self.client.put(self.url(path)).json(body))
      .send()
      .await?;
    if !resp.status().is_success() {
      return Err(Error::Status {
        method: "PUT",
        path: path.to_owned(),
        status: resp.status(),
      });
    }
    Ok(())
  }
}

// ─── Trait impl ──────────────────────────────────────────────────────────────

impl CatalogApi for CatalogClient {
  type Error = Error;

  /// `GET api/auth/userInfo`
  async fn user_info(&self) -> Result<Option<Identity>> {
    let envelope: UserEnvelope = self.get_json("/auth/userInfo").await?;
    Ok(envelope.user)
  }

  /// `GET api/vendor-info`
  async fn vendor_info(&self) -> Result<Option<Identity>> {
    let envelope: VendorEnvelope = self.get_json("/vendor-info").await?;
    Ok(envelope.vendor)
  }

  /// `GET api/categories` — a bare array, no envelope.
  async fn categories(&self) -> Result<Vec<Category>> {
    self.get_json("/categories").await
  }

  /// `GET api/website/{id}`
  async fn logo_url(&self, website: &WebsiteId) -> Result<String> {
    let envelope: LogoEnvelope =
      self.get_json(&format!("/website/{website}")).await?;
    Ok(envelope.logo_url)
  }

  /// `GET api/product/products`
  async fn products(&self) -> Result<Vec<Product>> {
    let envelope: ProductsEnvelope =
      self.get_json("/product/products").await?;
    Ok(envelope.products)
  }

  /// `POST api/categories`
  async fn create_category(
    &self,
    payload: &CategoryPayload,
  ) -> Result<Category> {
    let envelope: CategoryEnvelope =
      self.post_json("/categories", payload).await?;
    Ok(envelope.category)
  }

  /// `PUT api/categories/{id}`
  async fn update_category(
    &self,
    id: &CategoryId,
    payload: &CategoryPayload,
  ) -> Result<()> {
    self.put_unit(&format!("/categories/{id}"), payload).await
  }

  /// `POST api/categories` with the minimal quick-add body.
  async fn quick_add_category(
    &self,
    payload: &QuickCategoryPayload,
  ) -> Result<Category> {
    let envelope: CategoryEnvelope =
      self.post_json("/categories", payload).await?;
    Ok(envelope.category)
  }

  /// `POST api/product/createproduct`
  async fn create_product(&self, payload: &ProductPayload) -> Result<()> {
    self.post_unit("/product/createproduct", payload).await
  }

  /// `PUT api/product/products/{id}`
  async fn update_product(
    &self,
    id: &ProductId,
    payload: &ProductPayload,
  ) -> Result<()> {
    self
      .put_unit(&format!("/product/products/{id}"), payload)
      .await
  }
}
