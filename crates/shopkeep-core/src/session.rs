//! Session state and the identity/catalog bootstrap sequence.
//!
//! The session is an explicitly-constructed object owned by the application;
//! views borrow it. Nothing here touches HTTP directly — everything goes
//! through [`CatalogApi`], which keeps the sequence testable against stubs.

use tracing::{debug, warn};

use crate::{
  api::CatalogApi,
  category::Category,
  identity::{Identity, WebsiteId},
};

// ─── Phase ───────────────────────────────────────────────────────────────────

/// Progress of the bootstrap state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
  /// No session token is available; nothing was attempted.
  NoToken,
  /// The user/vendor lookups are in flight.
  ResolvingIdentity,
  /// An identity was found; dependent state not yet requested.
  IdentityResolved,
  /// Category and logo fetches are in flight.
  FetchingCatalog,
  /// Bootstrap finished. Individual pieces may still be at their defaults
  /// if their fetch failed; partial failure is tolerated.
  CatalogReady,
  /// Neither the user nor the vendor lookup produced an identity.
  ResolutionFailed,
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// Shared session-scoped state: the resolved identity, the category list,
/// and the storefront logo URL.
#[derive(Debug)]
pub struct Session {
  phase: SessionPhase,
  identity: Option<Identity>,
  categories: Vec<Category>,
  logo_url: String,
}

impl Session {
  /// An empty, unresolved session.
  pub fn new() -> Self {
    Self {
      phase: SessionPhase::NoToken,
      identity: None,
      categories: Vec::new(),
      logo_url: String::new(),
    }
  }

  /// Run the full bootstrap sequence: resolve the identity, then load the
  /// dependent catalog state. Without a token nothing is attempted and no
  /// request is issued.
  pub async fn bootstrap<A: CatalogApi>(api: &A, token_present: bool) -> Self {
    let mut session = Self::new();
    if !token_present {
      debug!("no session token; skipping identity resolution");
      return session;
    }
    session.resolve_identity(api).await;
    if session.identity.is_some() {
      session.load_catalog(api).await;
    }
    session
  }

  // ── Accessors ─────────────────────────────────────────────────────────────

  pub fn phase(&self) -> SessionPhase {
    self.phase
  }

  pub fn identity(&self) -> Option<&Identity> {
    self.identity.as_ref()
  }

  pub fn categories(&self) -> &[Category] {
    &self.categories
  }

  pub fn logo_url(&self) -> &str {
    &self.logo_url
  }

  /// Whether the resolved identity may create or edit catalog entries.
  pub fn can_manage_catalog(&self) -> bool {
    self
      .identity
      .as_ref()
      .is_some_and(|identity| identity.role.can_manage_catalog())
  }

  /// The resolved identity's storefront website, when one is known.
  pub fn reference_website(&self) -> Option<&WebsiteId> {
    self
      .identity
      .as_ref()
      .map(|identity| &identity.reference_website)
      .filter(|website| !website.as_str().is_empty())
  }

  // ── Mutation ──────────────────────────────────────────────────────────────

  /// Append a category created elsewhere (the quick-add flow) without a
  /// full reload.
  pub fn push_category(&mut self, category: Category) {
    self.categories.push(category);
  }

  /// Replace the whole category list after a refetch.
  pub fn replace_categories(&mut self, categories: Vec<Category>) {
    self.categories = categories;
  }

  // ── Bootstrap steps ───────────────────────────────────────────────────────

  /// Resolve the token to an identity: end user first, vendor as fallback.
  /// A failed or empty user lookup is not fatal — only both lookups coming
  /// back empty marks the session as failed.
  pub async fn resolve_identity<A: CatalogApi>(&mut self, api: &A) {
    self.phase = SessionPhase::ResolvingIdentity;

    match api.user_info().await {
      Ok(Some(user)) => {
        self.identity = Some(user);
        self.phase = SessionPhase::IdentityResolved;
        return;
      }
      Ok(None) => {
        debug!("token does not map to an end user; trying vendor lookup");
      }
      Err(error) => {
        warn!(%error, "user lookup failed; trying vendor lookup");
      }
    }

    match api.vendor_info().await {
      Ok(Some(vendor)) => {
        self.identity = Some(vendor);
        self.phase = SessionPhase::IdentityResolved;
      }
      Ok(None) => {
        warn!("session token resolved to neither a user nor a vendor");
        self.phase = SessionPhase::ResolutionFailed;
      }
      Err(error) => {
        warn!(%error, "vendor lookup failed");
        self.phase = SessionPhase::ResolutionFailed;
      }
    }
  }

  /// Fetch the category list and the logo concurrently. Each failure is
  /// logged and leaves that piece of state at its previous value; one
  /// failing never blocks the other.
  pub async fn load_catalog<A: CatalogApi>(&mut self, api: &A) {
    let Some(identity) = &self.identity else {
      return;
    };
    self.phase = SessionPhase::FetchingCatalog;

    let website = identity.reference_website.clone();
    let (categories, logo) =
      futures::join!(api.categories(), api.logo_url(&website));

    match categories {
      Ok(list) => self.categories = list,
      Err(error) => {
        warn!(%error, "category fetch failed; keeping previous list");
      }
    }
    match logo {
      Ok(url) => self.logo_url = url,
      Err(error) => {
        warn!(%error, "logo fetch failed; keeping previous value");
      }
    }

    self.phase = SessionPhase::CatalogReady;
  }
}

impl Default for Session {
  fn default() -> Self {
    Self::new()
  }
}
