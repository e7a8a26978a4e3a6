//! Categories and the category editor draft.
//!
//! A category owns an embedded list of subcategories; there is no separate
//! subcategory collection on the backend. The editor draft mirrors the
//! dialog exactly: a name, a description, and a grid of subcategory rows
//! that is never allowed to shrink below one row while the dialog is open.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
  error::{Error, Result},
  identity::WebsiteId,
};

// ─── Ids ─────────────────────────────────────────────────────────────────────

/// Backend-assigned opaque category id.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl fmt::Display for CategoryId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Backend-assigned opaque subcategory id.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SubcategoryId(pub String);

impl fmt::Display for SubcategoryId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Entities ────────────────────────────────────────────────────────────────

/// One subcategory entry embedded in a category.
///
/// Also used as an editor row: rows typed in by the operator have no id yet,
/// rows seeded from an existing category keep theirs so an update does not
/// orphan them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
  #[serde(
    rename = "_id",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub id: Option<SubcategoryId>,

  pub name: String,

  #[serde(default)]
  pub description: String,
}

/// A catalog category with its embedded subcategory list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
  #[serde(rename = "_id")]
  pub id: CategoryId,

  pub name: String,

  #[serde(default)]
  pub description: String,

  #[serde(rename = "subcat", default)]
  pub subcategories: Vec<Subcategory>,
}

// ─── Request payloads ────────────────────────────────────────────────────────

/// Body of a category create or update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPayload {
  pub name: String,

  pub description: String,

  #[serde(rename = "subcat")]
  pub subcategories: Vec<Subcategory>,
}

/// Body of a quick-add category request, spawned from the product editor.
/// Deliberately minimal: the backend fills in everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickCategoryPayload {
  pub name: String,

  #[serde(rename = "referenceWebsite")]
  pub reference_website: WebsiteId,
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// The single request a category submit will perform.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryAction {
  Create(CategoryPayload),
  Update(CategoryId, CategoryPayload),
}

/// Editable state behind the category dialog.
#[derive(Debug, Clone)]
pub struct CategoryDraft {
  existing: Option<CategoryId>,
  pub name: String,
  pub description: String,
  rows: Vec<Subcategory>,
}

impl CategoryDraft {
  /// A create draft: empty fields and a single blank subcategory row.
  pub fn new() -> Self {
    Self {
      existing: None,
      name: String::new(),
      description: String::new(),
      rows: vec![Subcategory::default()],
    }
  }

  /// An edit draft seeded from an existing category. Row ids are kept so the
  /// update round-trips them; a category without subcategories still opens
  /// with one blank row.
  pub fn edit(category: &Category) -> Self {
    let mut rows = category.subcategories.clone();
    if rows.is_empty() {
      rows.push(Subcategory::default());
    }
    Self {
      existing: Some(category.id.clone()),
      name: category.name.clone(),
      description: category.description.clone(),
      rows,
    }
  }

  pub fn is_edit(&self) -> bool {
    self.existing.is_some()
  }

  pub fn rows(&self) -> &[Subcategory] {
    &self.rows
  }

  pub fn row_mut(&mut self, index: usize) -> Option<&mut Subcategory> {
    self.rows.get_mut(index)
  }

  /// Append a fresh blank row below the existing ones.
  pub fn add_row(&mut self) {
    self.rows.push(Subcategory::default());
  }

  /// Remove the row at `index`. Removing the last remaining row replaces it
  /// with a blank one; the grid never shows zero rows. Out-of-range indices
  /// are ignored.
  pub fn remove_row(&mut self, index: usize) {
    if index >= self.rows.len() {
      return;
    }
    self.rows.remove(index);
    if self.rows.is_empty() {
      self.rows.push(Subcategory::default());
    }
  }

  /// Validate the draft and decide which request a submit performs.
  ///
  /// Rows whose name is blank after trimming are dropped from the payload;
  /// they exist only as editing affordances. The draft itself is untouched,
  /// so a failed submit leaves the dialog exactly as the operator left it.
  pub fn submit_action(&self) -> Result<CategoryAction> {
    if self.name.trim().is_empty() {
      return Err(Error::MissingFields(vec!["name"]));
    }

    let subcategories = self
      .rows
      .iter()
      .filter(|row| !row.name.trim().is_empty())
      .cloned()
      .collect();

    let payload = CategoryPayload {
      name: self.name.clone(),
      description: self.description.clone(),
      subcategories,
    };

    Ok(match &self.existing {
      Some(id) => CategoryAction::Update(id.clone(), payload),
      None => CategoryAction::Create(payload),
    })
  }
}

impl Default for CategoryDraft {
  fn default() -> Self {
    Self::new()
  }
}
