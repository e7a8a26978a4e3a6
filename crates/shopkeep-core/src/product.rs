//! Products and the product editor draft.
//!
//! The draft models the dialog as the operator sees it: text buffers for
//! everything typed (price included — parsing happens at submit, not per
//! keystroke), id selections for category and subcategory, and a tag set for
//! technologies. [`ProductDraft::submit_action`] is the single place where a
//! draft turns into a request, so "invalid drafts never reach the network"
//! holds by construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
  category::{Category, CategoryId, QuickCategoryPayload, Subcategory, SubcategoryId},
  error::{Error, Result},
  identity::WebsiteId,
};

// ─── Ids ─────────────────────────────────────────────────────────────────────

/// Backend-assigned opaque product id.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Category reference ──────────────────────────────────────────────────────

/// Category reference on a product. List endpoints return a populated object,
/// others a bare id string; both decode here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
  Id(CategoryId),
  Embedded {
    #[serde(rename = "_id")]
    id: CategoryId,
    #[serde(default)]
    name: Option<String>,
  },
}

impl CategoryRef {
  pub fn id(&self) -> &CategoryId {
    match self {
      Self::Id(id) => id,
      Self::Embedded { id, .. } => id,
    }
  }

  /// The embedded display name, when the backend populated one.
  pub fn name(&self) -> Option<&str> {
    match self {
      Self::Id(_) => None,
      Self::Embedded { name, .. } => name.as_deref(),
    }
  }
}

// ─── Entity ──────────────────────────────────────────────────────────────────

/// A catalog product as returned by the backend. Every field except the id is
/// defensive: absent keys decode to empty/zero rather than failing the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  #[serde(rename = "_id")]
  pub id: ProductId,

  #[serde(default)]
  pub product_name: String,

  #[serde(default)]
  pub description: String,

  #[serde(default)]
  pub images: Vec<String>,

  #[serde(default)]
  pub price: f64,

  #[serde(default)]
  pub discount: f64,

  /// Derived sale price; recomputed on every submit, never edited.
  #[serde(default)]
  pub actual_price: f64,

  #[serde(default)]
  pub technologies: Vec<String>,

  #[serde(default)]
  pub category: Option<CategoryRef>,

  #[serde(default)]
  pub subcategory: Option<SubcategoryId>,

  #[serde(default)]
  pub reference_website: Option<WebsiteId>,

  #[serde(default)]
  pub overview: Option<String>,

  #[serde(default)]
  pub support: Option<String>,

  #[serde(default)]
  pub reviews: Option<String>,

  #[serde(default)]
  pub specification: Option<String>,
}

// ─── Request payload ─────────────────────────────────────────────────────────

/// Body of a product create or update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
  pub product_name: String,
  pub description: String,
  pub images: Vec<String>,
  pub price: f64,
  /// `price` reduced by `discount` percent, rounded to 2 decimal places.
  pub actual_price: f64,
  pub technologies: Vec<String>,
  pub discount: f64,
  pub reference_website: WebsiteId,
  pub category: CategoryId,
  pub subcategory: SubcategoryId,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub overview: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub support: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub reviews: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub specification: Option<String>,
}

/// Derived sale price: `price` reduced by `discount` percent, rounded to
/// 2 decimal places.
pub fn actual_price(price: f64, discount: f64) -> f64 {
  let raw = price * (100.0 - discount) / 100.0;
  (raw * 100.0).round() / 100.0
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// The single request a product submit will perform.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
  /// Quick-add mode: the name field creates a category instead.
  QuickAddCategory(QuickCategoryPayload),
  Create(ProductPayload),
  Update(ProductId, ProductPayload),
}

/// Pieces of a draft that must be present and well-formed before a normal
/// submit can build a payload.
struct ValidProduct {
  price: f64,
  images: Vec<String>,
  website: WebsiteId,
  category: CategoryId,
  subcategory: SubcategoryId,
}

/// Editable state behind the product dialog.
#[derive(Debug, Clone)]
pub struct ProductDraft {
  existing: Option<ProductId>,
  quick_add: bool,
  pub product_name: String,
  pub description: String,
  /// Comma-separated display form; split and trimmed at submit.
  pub images: String,
  pub price: String,
  pub discount: String,
  technologies: Vec<String>,
  pub reference_website: Option<WebsiteId>,
  category: Option<CategoryId>,
  subcategory: Option<SubcategoryId>,
  pub overview: String,
  pub support: String,
  pub reviews: String,
  pub specification: String,
}

impl ProductDraft {
  /// A create draft. `reference_website` comes from the session, not the
  /// operator; it is display-only in the dialog.
  pub fn new(reference_website: Option<WebsiteId>) -> Self {
    Self {
      existing: None,
      quick_add: false,
      product_name: String::new(),
      description: String::new(),
      images: String::new(),
      price: String::new(),
      discount: String::new(),
      technologies: Vec::new(),
      reference_website,
      category: None,
      subcategory: None,
      overview: String::new(),
      support: String::new(),
      reviews: String::new(),
      specification: String::new(),
    }
  }

  /// A quick-add draft: the same dialog shell, but only the name field is
  /// live and the submit creates a category.
  pub fn quick_add(reference_website: Option<WebsiteId>) -> Self {
    Self {
      quick_add: true,
      ..Self::new(reference_website)
    }
  }

  /// An edit draft seeded from an existing product, with empty/zero fallbacks
  /// for whatever the record lacks. When the session carries a reference
  /// website it overrides the record's own, matching how the backend scopes
  /// catalog writes.
  pub fn edit(product: &Product, reference_website: Option<WebsiteId>) -> Self {
    Self {
      existing: Some(product.id.clone()),
      quick_add: false,
      product_name: product.product_name.clone(),
      description: product.description.clone(),
      images: product.images.join(", "),
      price: product.price.to_string(),
      discount: product.discount.to_string(),
      technologies: product.technologies.clone(),
      reference_website: reference_website
        .or_else(|| product.reference_website.clone()),
      category: product.category.as_ref().map(|c| c.id().clone()),
      subcategory: product.subcategory.clone(),
      overview: product.overview.clone().unwrap_or_default(),
      support: product.support.clone().unwrap_or_default(),
      reviews: product.reviews.clone().unwrap_or_default(),
      specification: product.specification.clone().unwrap_or_default(),
    }
  }

  pub fn is_edit(&self) -> bool {
    self.existing.is_some()
  }

  pub fn is_quick_add(&self) -> bool {
    self.quick_add
  }

  // ── Selections ────────────────────────────────────────────────────────────

  pub fn category(&self) -> Option<&CategoryId> {
    self.category.as_ref()
  }

  /// Select a category. Always clears the subcategory: the old choice may
  /// not belong to the new category, so it never survives the change.
  pub fn select_category(&mut self, id: CategoryId) {
    self.category = Some(id);
    self.subcategory = None;
  }

  pub fn subcategory(&self) -> Option<&SubcategoryId> {
    self.subcategory.as_ref()
  }

  pub fn select_subcategory(&mut self, id: SubcategoryId) {
    self.subcategory = Some(id);
  }

  /// The subcategory choices for the currently selected category, looked up
  /// live in the caller's category list.
  pub fn subcategory_options<'a>(
    &self,
    categories: &'a [Category],
  ) -> &'a [Subcategory] {
    self
      .category
      .as_ref()
      .and_then(|id| categories.iter().find(|c| &c.id == id))
      .map(|c| c.subcategories.as_slice())
      .unwrap_or(&[])
  }

  // ── Technologies ──────────────────────────────────────────────────────────

  /// Selected tags in insertion order.
  pub fn technologies(&self) -> &[String] {
    &self.technologies
  }

  pub fn has_technology(&self, tag: &str) -> bool {
    self.technologies.iter().any(|t| t == tag)
  }

  /// Add `tag` to the selection, or remove it if already selected.
  pub fn toggle_technology(&mut self, tag: &str) {
    if let Some(pos) = self.technologies.iter().position(|t| t == tag) {
      self.technologies.remove(pos);
    } else {
      self.technologies.push(tag.to_owned());
    }
  }

  // ── Parsing ───────────────────────────────────────────────────────────────

  fn parsed_price(&self) -> Option<f64> {
    self
      .price
      .trim()
      .parse::<f64>()
      .ok()
      .filter(|p| p.is_finite() && *p != 0.0)
  }

  /// Discount is optional; anything unparsable counts as no discount.
  fn parsed_discount(&self) -> f64 {
    self
      .discount
      .trim()
      .parse::<f64>()
      .ok()
      .filter(|d| d.is_finite())
      .unwrap_or(0.0)
  }

  fn parsed_images(&self) -> Vec<String> {
    self
      .images
      .split(',')
      .map(str::trim)
      .filter(|entry| !entry.is_empty())
      .map(str::to_owned)
      .collect()
  }

  fn configured_website(&self) -> Option<WebsiteId> {
    self
      .reference_website
      .clone()
      .filter(|w| !w.as_str().is_empty())
  }

  /// Live preview of the derived sale price, parsed the same way the submit
  /// is. `None` while the price field does not hold a usable number.
  pub fn sale_price_preview(&self) -> Option<f64> {
    self
      .parsed_price()
      .map(|price| actual_price(price, self.parsed_discount()))
  }

  // ── Submit ────────────────────────────────────────────────────────────────

  fn validated(&self) -> Result<ValidProduct> {
    let price = self.parsed_price();
    let images = self.parsed_images();
    let website = self.configured_website();

    let mut missing = Vec::new();
    if self.product_name.trim().is_empty() {
      missing.push("product name");
    }
    if self.description.trim().is_empty() {
      missing.push("description");
    }
    if images.is_empty() {
      missing.push("images");
    }
    if price.is_none() {
      missing.push("price");
    }
    if website.is_none() {
      missing.push("reference website");
    }
    if self.category.is_none() {
      missing.push("category");
    }
    if self.subcategory.is_none() {
      missing.push("subcategory");
    }

    match (price, website, self.category.clone(), self.subcategory.clone()) {
      (Some(price), Some(website), Some(category), Some(subcategory))
        if missing.is_empty() =>
      {
        Ok(ValidProduct { price, images, website, category, subcategory })
      }
      _ => Err(Error::MissingFields(missing)),
    }
  }

  /// Validate the draft and decide which request a submit performs. The
  /// draft itself is untouched, so a failed submit leaves the dialog exactly
  /// as the operator left it.
  pub fn submit_action(&self) -> Result<ProductAction> {
    if self.quick_add {
      if self.product_name.trim().is_empty() {
        return Err(Error::MissingFields(vec!["product name"]));
      }
      let Some(website) = self.configured_website() else {
        return Err(Error::MissingFields(vec!["reference website"]));
      };
      return Ok(ProductAction::QuickAddCategory(QuickCategoryPayload {
        name: self.product_name.clone(),
        reference_website: website,
      }));
    }

    let valid = self.validated()?;
    let discount = self.parsed_discount();

    let payload = ProductPayload {
      product_name: self.product_name.clone(),
      description: self.description.clone(),
      images: valid.images,
      price: valid.price,
      actual_price: actual_price(valid.price, discount),
      technologies: self.technologies.clone(),
      discount,
      reference_website: valid.website,
      category: valid.category,
      subcategory: valid.subcategory,
      overview: none_if_blank(&self.overview),
      support: none_if_blank(&self.support),
      reviews: none_if_blank(&self.reviews),
      specification: none_if_blank(&self.specification),
    };

    Ok(match &self.existing {
      Some(id) => ProductAction::Update(id.clone(), payload),
      None => ProductAction::Create(payload),
    })
  }
}

fn none_if_blank(text: &str) -> Option<String> {
  (!text.trim().is_empty()).then(|| text.to_owned())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn categories() -> Vec<Category> {
    vec![
      Category {
        id: CategoryId("c1".into()),
        name: "Templates".into(),
        description: String::new(),
        subcategories: vec![
          Subcategory {
            id: Some(SubcategoryId("s1".into())),
            name: "Admin Dashboards".into(),
            description: String::new(),
          },
          Subcategory {
            id: Some(SubcategoryId("s2".into())),
            name: "Landing Pages".into(),
            description: String::new(),
          },
        ],
      },
      Category {
        id: CategoryId("c2".into()),
        name: "Plugins".into(),
        description: String::new(),
        subcategories: vec![Subcategory {
          id: Some(SubcategoryId("s3".into())),
          name: "Payments".into(),
          description: String::new(),
        }],
      },
    ]
  }

  fn sample_product() -> Product {
    Product {
      id: ProductId("p1".into()),
      product_name: "Storefront Kit".into(),
      description: "Full storefront template".into(),
      images: vec!["a.png".into(), "b.png".into()],
      price: 19.99,
      discount: 10.0,
      actual_price: 17.99,
      technologies: vec!["React".into(), "MongoDB".into()],
      category: Some(CategoryRef::Embedded {
        id: CategoryId("c1".into()),
        name: Some("Templates".into()),
      }),
      subcategory: Some(SubcategoryId("s1".into())),
      reference_website: Some(WebsiteId("w1".into())),
      overview: None,
      support: None,
      reviews: None,
      specification: None,
    }
  }

  fn valid_draft() -> ProductDraft {
    ProductDraft::edit(&sample_product(), None)
  }

  #[test]
  fn actual_price_applies_discount_and_rounds() {
    assert_eq!(actual_price(19.99, 10.0), 17.99);
    assert_eq!(actual_price(49.95, 15.0), 42.46);
    assert_eq!(actual_price(10.0, 0.0), 10.0);
    assert_eq!(actual_price(25.0, 100.0), 0.0);
  }

  #[test]
  fn edit_seeds_fields_and_joins_images() {
    let draft = valid_draft();
    assert!(draft.is_edit());
    assert_eq!(draft.images, "a.png, b.png");
    assert_eq!(draft.price, "19.99");
    assert_eq!(draft.category(), Some(&CategoryId("c1".into())));
    assert_eq!(draft.reference_website, Some(WebsiteId("w1".into())));
  }

  #[test]
  fn session_website_overrides_the_record() {
    let draft =
      ProductDraft::edit(&sample_product(), Some(WebsiteId("w2".into())));
    assert_eq!(draft.reference_website, Some(WebsiteId("w2".into())));
  }

  #[test]
  fn images_round_trip_through_the_display_string() {
    let action = valid_draft().submit_action().unwrap();
    let ProductAction::Update(_, payload) = action else {
      panic!("expected an update action");
    };
    assert_eq!(payload.images, vec!["a.png", "b.png"]);
  }

  #[test]
  fn blank_image_entries_are_dropped() {
    let mut draft = valid_draft();
    draft.images = " a.png , , b.png ,".into();
    let ProductAction::Update(_, payload) = draft.submit_action().unwrap()
    else {
      panic!("expected an update action");
    };
    assert_eq!(payload.images, vec!["a.png", "b.png"]);
  }

  #[test]
  fn changing_category_always_clears_subcategory() {
    let mut draft = valid_draft();
    assert!(draft.subcategory().is_some());
    draft.select_category(CategoryId("c2".into()));
    assert_eq!(draft.subcategory(), None);
  }

  #[test]
  fn subcategory_options_follow_the_selected_category() {
    let categories = categories();
    let mut draft = ProductDraft::new(None);
    assert!(draft.subcategory_options(&categories).is_empty());

    draft.select_category(CategoryId("c1".into()));
    assert_eq!(draft.subcategory_options(&categories).len(), 2);

    draft.select_category(CategoryId("c2".into()));
    assert_eq!(draft.subcategory_options(&categories).len(), 1);
    assert_eq!(draft.subcategory_options(&categories)[0].name, "Payments");
  }

  #[test]
  fn technology_selection_is_a_set() {
    let mut draft = ProductDraft::new(None);
    draft.toggle_technology("React");
    draft.toggle_technology("MongoDB");
    draft.toggle_technology("React");
    assert_eq!(draft.technologies(), ["MongoDB"]);
    assert!(!draft.has_technology("React"));
  }

  #[test]
  fn unknown_seeded_tags_are_preserved() {
    let mut product = sample_product();
    product.technologies.push("FoundryVTT".into());
    let draft = ProductDraft::edit(&product, None);
    assert!(draft.has_technology("FoundryVTT"));
  }

  #[test]
  fn empty_draft_reports_every_required_field() {
    let err = ProductDraft::new(None).submit_action().unwrap_err();
    assert_eq!(
      err,
      Error::MissingFields(vec![
        "product name",
        "description",
        "images",
        "price",
        "reference website",
        "category",
        "subcategory",
      ])
    );
  }

  #[test]
  fn zero_or_unparsable_price_counts_as_missing() {
    for bad in ["0", "abc", ""] {
      let mut draft = valid_draft();
      draft.price = bad.into();
      let err = draft.submit_action().unwrap_err();
      assert_eq!(err, Error::MissingFields(vec!["price"]), "price = {bad:?}");
    }
  }

  #[test]
  fn unparsable_discount_falls_back_to_zero() {
    let mut draft = valid_draft();
    draft.discount = "lots".into();
    let ProductAction::Update(_, payload) = draft.submit_action().unwrap()
    else {
      panic!("expected an update action");
    };
    assert_eq!(payload.discount, 0.0);
    assert_eq!(payload.actual_price, 19.99);
  }

  #[test]
  fn payload_recomputes_actual_price() {
    let mut draft = valid_draft();
    draft.price = "100".into();
    draft.discount = "25".into();
    let ProductAction::Update(_, payload) = draft.submit_action().unwrap()
    else {
      panic!("expected an update action");
    };
    assert_eq!(payload.actual_price, 75.0);
  }

  #[test]
  fn sale_price_preview_tracks_the_draft_fields() {
    let mut draft = ProductDraft::new(None);
    assert_eq!(draft.sale_price_preview(), None);

    draft.price = "100".into();
    assert_eq!(draft.sale_price_preview(), Some(100.0));

    draft.discount = "25".into();
    assert_eq!(draft.sale_price_preview(), Some(75.0));

    draft.price = "abc".into();
    assert_eq!(draft.sale_price_preview(), None);
  }

  #[test]
  fn create_and_update_route_by_existing_id() {
    let mut create = ProductDraft::new(Some(WebsiteId("w1".into())));
    create.product_name = "New Kit".into();
    create.description = "Fresh".into();
    create.images = "x.png".into();
    create.price = "5".into();
    create.select_category(CategoryId("c1".into()));
    create.select_subcategory(SubcategoryId("s1".into()));
    assert!(matches!(
      create.submit_action().unwrap(),
      ProductAction::Create(_)
    ));

    assert!(matches!(
      valid_draft().submit_action().unwrap(),
      ProductAction::Update(id, _) if id == ProductId("p1".into())
    ));
  }

  #[test]
  fn quick_add_requires_only_the_name() {
    let mut draft = ProductDraft::quick_add(Some(WebsiteId("w1".into())));
    let err = draft.submit_action().unwrap_err();
    assert_eq!(err, Error::MissingFields(vec!["product name"]));

    draft.product_name = "Widgets".into();
    let action = draft.submit_action().unwrap();
    assert_eq!(
      action,
      ProductAction::QuickAddCategory(QuickCategoryPayload {
        name: "Widgets".into(),
        reference_website: WebsiteId("w1".into()),
      })
    );
  }

  #[test]
  fn quick_add_without_a_configured_website_is_rejected() {
    let mut draft = ProductDraft::quick_add(None);
    draft.product_name = "Widgets".into();
    let err = draft.submit_action().unwrap_err();
    assert_eq!(err, Error::MissingFields(vec!["reference website"]));
  }

  #[test]
  fn payload_serialises_camel_case_keys() {
    let ProductAction::Update(_, payload) =
      valid_draft().submit_action().unwrap()
    else {
      panic!("expected an update action");
    };
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["productName"], "Storefront Kit");
    assert_eq!(json["actualPrice"], 17.99);
    assert_eq!(json["referenceWebsite"], "w1");
    assert_eq!(json["category"], "c1");
    assert_eq!(json["subcategory"], "s1");
    assert!(json.get("overview").is_none());
  }

  #[test]
  fn product_decodes_bare_and_embedded_category_refs() {
    let bare: Product = serde_json::from_str(
      r#"{ "_id": "p1", "category": "c9" }"#,
    )
    .unwrap();
    assert_eq!(
      bare.category.as_ref().map(|c| c.id().clone()),
      Some(CategoryId("c9".into()))
    );
    assert_eq!(bare.category.unwrap().name(), None);

    let embedded: Product = serde_json::from_str(
      r#"{
        "_id": "p2",
        "category": { "_id": "c1", "name": "Templates", "subcat": [] }
      }"#,
    )
    .unwrap();
    let category = embedded.category.unwrap();
    assert_eq!(category.id(), &CategoryId("c1".into()));
    assert_eq!(category.name(), Some("Templates"));
  }

  #[test]
  fn product_tolerates_missing_fields() {
    let product: Product =
      serde_json::from_str(r#"{ "_id": "p1" }"#).unwrap();
    assert_eq!(product.product_name, "");
    assert_eq!(product.price, 0.0);
    assert!(product.images.is_empty());
    assert_eq!(product.category, None);
  }
}
