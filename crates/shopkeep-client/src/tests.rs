//! Integration tests for `CatalogClient` against a loopback HTTP server.
//!
//! Each test spins up a one-route axum app on an ephemeral port and points a
//! real client at it, so URL construction, auth headers, payload shapes, and
//! envelope decoding are all exercised over an actual socket.

use std::sync::{Arc, Mutex};

use axum::{
  Json, Router,
  extract::Path,
  http::{HeaderMap, StatusCode},
  routing::{get, post, put},
};
use serde_json::{Value, json};

use shopkeep_core::{
  api::CatalogApi as _,
  category::{
    CategoryAction, CategoryDraft, CategoryId, QuickCategoryPayload,
    SubcategoryId,
  },
  identity::{Role, WebsiteId},
  product::{ProductId, ProductPayload},
};

use crate::{CatalogClient, ClientConfig, Error};

type Recorded = Arc<Mutex<Vec<Value>>>;

async fn serve(app: Router) -> String {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  format!("http://{addr}")
}

fn client(base_url: &str, token: &str) -> CatalogClient {
  CatalogClient::new(ClientConfig {
    base_url: base_url.to_owned(),
    token: token.to_owned(),
  })
  .unwrap()
}

fn sample_payload() -> ProductPayload {
  ProductPayload {
    product_name: "Storefront Kit".into(),
    description: "Full storefront template".into(),
    images: vec!["a.png".into(), "b.png".into()],
    price: 19.99,
    actual_price: 17.99,
    technologies: vec!["React".into()],
    discount: 10.0,
    reference_website: WebsiteId("w1".into()),
    category: CategoryId("c1".into()),
    subcategory: SubcategoryId("s1".into()),
    overview: None,
    support: None,
    reviews: None,
    specification: None,
  }
}

// ─── Identity ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn user_info_decodes_the_user_envelope() {
  let app = Router::new().route(
    "/api/auth/userInfo",
    get(|| async {
      Json(json!({
        "user": {
          "_id": "u1",
          "name": "Asha",
          "role": "admin",
          "referenceWebsite": "w1"
        }
      }))
    }),
  );
  let base = serve(app).await;

  let user = client(&base, "tok").user_info().await.unwrap().unwrap();
  assert_eq!(user.id, "u1");
  assert_eq!(user.role, Role::Admin);
  assert_eq!(user.reference_website, WebsiteId("w1".into()));
}

#[tokio::test]
async fn missing_user_resolves_to_none() {
  let app = Router::new().route(
    "/api/auth/userInfo",
    get(|| async { Json(json!({ "user": null })) }),
  );
  let base = serve(app).await;

  let user = client(&base, "tok").user_info().await.unwrap();
  assert!(user.is_none());
}

#[tokio::test]
async fn vendor_info_decodes_the_vendor_envelope() {
  let app = Router::new().route(
    "/api/vendor-info",
    get(|| async {
      Json(json!({
        "vendor": { "_id": "v1", "role": "vendor", "referenceWebsite": "w2" }
      }))
    }),
  );
  let base = serve(app).await;

  let vendor = client(&base, "tok").vendor_info().await.unwrap().unwrap();
  assert_eq!(vendor.id, "v1");
  assert_eq!(vendor.role, Role::Vendor);
}

#[tokio::test]
async fn bearer_token_is_sent_only_when_configured() {
  let seen: Arc<Mutex<Vec<Option<String>>>> = Arc::default();
  let record = seen.clone();
  let app = Router::new().route(
    "/api/categories",
    get(move |headers: HeaderMap| {
      let record = record.clone();
      async move {
        let auth = headers
          .get("authorization")
          .and_then(|v| v.to_str().ok())
          .map(str::to_owned);
        record.lock().unwrap().push(auth);
        Json(json!([]))
      }
    }),
  );
  let base = serve(app).await;

  client(&base, "sekrit").categories().await.unwrap();
  client(&base, "").categories().await.unwrap();

  let seen = seen.lock().unwrap();
  assert_eq!(seen[0].as_deref(), Some("Bearer sekrit"));
  assert_eq!(seen[1], None);
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn categories_decode_from_a_bare_array() {
  let app = Router::new().route(
    "/api/categories",
    get(|| async {
      Json(json!([
        { "_id": "c1", "name": "Templates", "subcat": [] },
        { "_id": "c2", "name": "Plugins" }
      ]))
    }),
  );
  let base = serve(app).await;

  let categories = client(&base, "tok").categories().await.unwrap();
  assert_eq!(categories.len(), 2);
  assert_eq!(categories[0].id, CategoryId("c1".into()));
  assert!(categories[1].subcategories.is_empty());
}

#[tokio::test]
async fn products_unwrap_their_envelope() {
  let app = Router::new().route(
    "/api/product/products",
    get(|| async {
      Json(json!({
        "products": [
          { "_id": "p1", "productName": "Kit", "price": 19.99 }
        ]
      }))
    }),
  );
  let base = serve(app).await;

  let products = client(&base, "tok").products().await.unwrap();
  assert_eq!(products.len(), 1);
  assert_eq!(products[0].product_name, "Kit");
  assert_eq!(products[0].price, 19.99);
}

#[tokio::test]
async fn logo_url_hits_the_website_path() {
  let app = Router::new().route(
    "/api/website/{id}",
    get(|Path(id): Path<String>| async move {
      Json(json!({ "logoUrl": format!("https://cdn.example/{id}.png") }))
    }),
  );
  let base = serve(app).await;

  let logo = client(&base, "tok")
    .logo_url(&WebsiteId("w1".into()))
    .await
    .unwrap();
  assert_eq!(logo, "https://cdn.example/w1.png");
}

// ─── Writes ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn quick_add_posts_the_minimal_payload() {
  let bodies: Recorded = Arc::default();
  let record = bodies.clone();
  let app = Router::new().route(
    "/api/categories",
    post(move |Json(body): Json<Value>| {
      let record = record.clone();
      async move {
        record.lock().unwrap().push(body);
        Json(json!({
          "category": { "_id": "c9", "name": "Widgets", "subcat": [] }
        }))
      }
    }),
  );
  let base = serve(app).await;

  let payload = QuickCategoryPayload {
    name: "Widgets".into(),
    reference_website: WebsiteId("w1".into()),
  };
  let category = client(&base, "tok")
    .quick_add_category(&payload)
    .await
    .unwrap();

  assert_eq!(category.id, CategoryId("c9".into()));
  assert_eq!(
    bodies.lock().unwrap()[0],
    json!({ "name": "Widgets", "referenceWebsite": "w1" })
  );
}

#[tokio::test]
async fn category_submit_round_trips_without_blank_rows() {
  let bodies: Recorded = Arc::default();
  let record = bodies.clone();
  let app = Router::new().route(
    "/api/categories",
    post(move |Json(body): Json<Value>| {
      let record = record.clone();
      async move {
        record.lock().unwrap().push(body);
        Json(json!({
          "category": { "_id": "c1", "name": "Templates", "subcat": [] }
        }))
      }
    }),
  );
  let base = serve(app).await;

  let mut draft = CategoryDraft::new();
  draft.name = "Templates".into();
  if let Some(row) = draft.row_mut(0) {
    row.name = "Admin Dashboards".into();
  }
  draft.add_row();

  let CategoryAction::Create(payload) = draft.submit_action().unwrap() else {
    panic!("expected a create action");
  };
  client(&base, "tok").create_category(&payload).await.unwrap();

  let body = &bodies.lock().unwrap()[0];
  assert_eq!(body["name"], "Templates");
  assert_eq!(body["subcat"].as_array().unwrap().len(), 1);
  assert_eq!(body["subcat"][0]["name"], "Admin Dashboards");
}

#[tokio::test]
async fn create_product_posts_to_createproduct() {
  let bodies: Recorded = Arc::default();
  let record = bodies.clone();
  let app = Router::new().route(
    "/api/product/createproduct",
    post(move |Json(body): Json<Value>| {
      let record = record.clone();
      async move {
        record.lock().unwrap().push(body);
        StatusCode::OK
      }
    }),
  );
  let base = serve(app).await;

  client(&base, "tok")
    .create_product(&sample_payload())
    .await
    .unwrap();

  let body = &bodies.lock().unwrap()[0];
  assert_eq!(body["productName"], "Storefront Kit");
  assert_eq!(body["actualPrice"], 17.99);
  assert_eq!(body["referenceWebsite"], "w1");
}

#[tokio::test]
async fn update_product_puts_to_the_product_path() {
  let ids: Arc<Mutex<Vec<String>>> = Arc::default();
  let record = ids.clone();
  let app = Router::new().route(
    "/api/product/products/{id}",
    put(move |Path(id): Path<String>, Json(_body): Json<Value>| {
      let record = record.clone();
      async move {
        record.lock().unwrap().push(id);
        StatusCode::OK
      }
    }),
  );
  let base = serve(app).await;

  client(&base, "tok")
    .update_product(&ProductId("p7".into()), &sample_payload())
    .await
    .unwrap();

  assert_eq!(*ids.lock().unwrap(), ["p7"]);
}

#[tokio::test]
async fn update_category_puts_to_the_category_path() {
  let ids: Arc<Mutex<Vec<String>>> = Arc::default();
  let record = ids.clone();
  let app = Router::new().route(
    "/api/categories/{id}",
    put(move |Path(id): Path<String>, Json(_body): Json<Value>| {
      let record = record.clone();
      async move {
        record.lock().unwrap().push(id);
        StatusCode::OK
      }
    }),
  );
  let base = serve(app).await;

  let mut draft = CategoryDraft::new();
  draft.name = "Renamed".into();
  let CategoryAction::Create(payload) = draft.submit_action().unwrap() else {
    panic!("expected a create action");
  };
  client(&base, "tok")
    .update_category(&CategoryId("c3".into()), &payload)
    .await
    .unwrap();

  assert_eq!(*ids.lock().unwrap(), ["c3"]);
}

// ─── Failures ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn non_success_status_surfaces_as_a_status_error() {
  let app = Router::new().route(
    "/api/categories",
    get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
  );
  let base = serve(app).await;

  let err = client(&base, "tok").categories().await.unwrap_err();
  assert!(matches!(
    err,
    Error::Status { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR
  ));
  assert!(err.to_string().contains("GET /categories"));
}

#[tokio::test]
async fn base_url_trailing_slash_is_tolerated() {
  let app = Router::new()
    .route("/api/categories", get(|| async { Json(json!([])) }));
  let base = serve(app).await;

  let categories = client(&format!("{base}/"), "tok")
    .categories()
    .await
    .unwrap();
  assert!(categories.is_empty());
}
