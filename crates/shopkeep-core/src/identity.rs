//! Operator identity — who is driving the catalog console.
//!
//! The backend keeps end users and vendors in separate collections behind
//! separate endpoints, but both deserialise into the same [`Identity`] shape.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── Website id ──────────────────────────────────────────────────────────────

/// Identifier of the storefront website a catalog entry belongs to.
///
/// Ids are backend-assigned opaque strings (Mongo-style object ids); they are
/// never parsed, only carried.
#[derive(
  Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WebsiteId(pub String);

impl WebsiteId {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for WebsiteId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Role ────────────────────────────────────────────────────────────────────

/// Role tag attached to a resolved identity.
///
/// Anything the backend sends that is not `admin` or `vendor` collapses to
/// [`Role::Other`]; unknown roles must not break deserialisation.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
  Admin,
  Vendor,
  #[default]
  Other,
}

impl From<String> for Role {
  fn from(s: String) -> Self {
    match s.as_str() {
      "admin" => Self::Admin,
      "vendor" => Self::Vendor,
      _ => Self::Other,
    }
  }
}

impl Role {
  /// Whether this role is allowed to create or edit catalog entries.
  pub fn can_manage_catalog(self) -> bool {
    matches!(self, Self::Admin | Self::Vendor)
  }
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// A resolved operator record, from either the user or the vendor lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
  #[serde(rename = "_id")]
  pub id: String,

  #[serde(default)]
  pub name: Option<String>,

  #[serde(default)]
  pub email: Option<String>,

  #[serde(default)]
  pub role: Role,

  /// The storefront this operator's catalog entries belong to.
  #[serde(rename = "referenceWebsite", default)]
  pub reference_website: WebsiteId,
}

impl Identity {
  /// Best display name: explicit name, then email, then the raw id.
  pub fn display_name(&self) -> &str {
    self
      .name
      .as_deref()
      .or(self.email.as_deref())
      .unwrap_or(&self.id)
  }
}
