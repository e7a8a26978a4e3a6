//! Application state and event handling.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use shopkeep_client::CatalogClient;
use shopkeep_core::{
  api::CatalogApi,
  category::{Category, CategoryAction, CategoryDraft},
  identity::WebsiteId,
  product::{Product, ProductAction, ProductDraft},
  session::Session,
  technology,
};
use tracing::{debug, warn};

/// How long category dialog notices stay on screen.
const CATEGORY_NOTICE_TTL: Duration = Duration::from_secs(2);
/// How long product dialog notices stay on screen.
const PRODUCT_NOTICE_TTL: Duration = Duration::from_secs(3);

// ─── Screens & Focus ────────────────────────────────────────────────────────

/// Which table currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  Products,
  Categories,
}

/// Focusable inputs of the product dialog, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
  Name,
  Description,
  Images,
  Price,
  Discount,
  Technologies,
  Category,
  Subcategory,
  Overview,
  Support,
  Reviews,
  Specification,
}

impl ProductField {
  const ORDER: [Self; 12] = [
    Self::Name,
    Self::Description,
    Self::Images,
    Self::Price,
    Self::Discount,
    Self::Technologies,
    Self::Category,
    Self::Subcategory,
    Self::Overview,
    Self::Support,
    Self::Reviews,
    Self::Specification,
  ];

  fn next(self) -> Self {
    let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
    Self::ORDER[(i + 1) % Self::ORDER.len()]
  }

  fn prev(self) -> Self {
    let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
    Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
  }
}

/// Which cell of a subcategory row is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowColumn {
  Name,
  Description,
}

/// Focusable inputs of the category dialog. Rows come after the two fixed
/// fields and are addressed by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
  Name,
  Description,
  Row(usize, RowColumn),
}

impl CategoryField {
  fn next(self, rows: usize) -> Self {
    match self {
      Self::Name => Self::Description,
      Self::Description => Self::Row(0, RowColumn::Name),
      Self::Row(i, RowColumn::Name) => Self::Row(i, RowColumn::Description),
      Self::Row(i, RowColumn::Description) if i + 1 < rows => {
        Self::Row(i + 1, RowColumn::Name)
      }
      Self::Row(_, RowColumn::Description) => Self::Name,
    }
  }

  fn prev(self, rows: usize) -> Self {
    match self {
      Self::Name => Self::Row(rows.saturating_sub(1), RowColumn::Description),
      Self::Description => Self::Name,
      Self::Row(0, RowColumn::Name) => Self::Description,
      Self::Row(i, RowColumn::Name) => Self::Row(i - 1, RowColumn::Description),
      Self::Row(i, RowColumn::Description) => Self::Row(i, RowColumn::Name),
    }
  }
}

// ─── Dialogs & Notices ──────────────────────────────────────────────────────

/// The open modal editor, if any. At most one dialog exists at a time.
pub enum Dialog {
  Product {
    draft:       ProductDraft,
    field:       ProductField,
    /// Cursor into the flattened technology catalog.
    tech_cursor: usize,
  },
  Category {
    draft: CategoryDraft,
    field: CategoryField,
  },
}

impl Dialog {
  fn product(draft: ProductDraft) -> Self {
    Self::Product { draft, field: ProductField::Name, tech_cursor: 0 }
  }

  fn category(draft: CategoryDraft) -> Self {
    Self::Category { draft, field: CategoryField::Name }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
  Success,
  Error,
}

/// A transient status-bar message with its own expiry.
pub struct Notice {
  pub text: &'static str,
  pub kind: NoticeKind,
  expires_at: Instant,
}

impl Notice {
  fn success(text: &'static str, ttl: Duration) -> Self {
    Self { text, kind: NoticeKind::Success, expires_at: Instant::now() + ttl }
  }

  fn error(text: &'static str, ttl: Duration) -> Self {
    Self { text, kind: NoticeKind::Error, expires_at: Instant::now() + ttl }
  }

  fn is_expired(&self) -> bool {
    Instant::now() >= self.expires_at
  }
}

// ─── App ────────────────────────────────────────────────────────────────────

/// Application state.
pub struct App {
  /// Which table has focus.
  pub screen:          Screen,
  /// Identity, category list, and logo resolved at startup.
  pub session:         Session,
  /// All products returned by the backend.
  pub products:        Vec<Product>,
  /// Current filter string.
  pub filter:          String,
  /// Whether the operator is typing a filter query.
  pub filter_active:   bool,
  /// Cursor position within the filtered product list.
  pub product_cursor:  usize,
  /// Cursor position within the filtered category list.
  pub category_cursor: usize,
  /// The open editor dialog, if any.
  pub dialog:          Option<Dialog>,
  /// Transient status-bar message.
  pub notice:          Option<Notice>,
  /// Website id stamped on quick-added categories. Comes from configuration,
  /// not from the session, and the two are never mixed.
  quick_add_website:   Option<WebsiteId>,
  client:              CatalogClient,
}

impl App {
  pub fn new(
    client: CatalogClient,
    quick_add_website: Option<WebsiteId>,
  ) -> Self {
    Self {
      screen: Screen::Products,
      session: Session::new(),
      products: Vec::new(),
      filter: String::new(),
      filter_active: false,
      product_cursor: 0,
      category_cursor: 0,
      dialog: None,
      notice: None,
      quick_add_website,
      client,
    }
  }

  /// Resolve the session and load the product table. Partial failures leave
  /// an emptier console, never a dead one.
  pub async fn bootstrap(&mut self) {
    self.session =
      Session::bootstrap(&self.client, self.client.has_token()).await;
    self.refresh_products().await;
  }

  /// Advance time-based state. Called once per poll interval.
  pub fn tick(&mut self) {
    if self.notice.as_ref().is_some_and(Notice::is_expired) {
      self.notice = None;
    }
  }

  // ── Filtered views ────────────────────────────────────────────────────────

  /// Products matching the current filter, by fuzzy name match.
  pub fn filtered_products(&self) -> Vec<&Product> {
    if self.filter.is_empty() {
      return self.products.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .products
      .iter()
      .filter(|p| {
        matcher.fuzzy_match(&p.product_name, &self.filter).is_some()
      })
      .collect()
  }

  /// Categories matching the current filter, by fuzzy name match.
  pub fn filtered_categories(&self) -> Vec<&Category> {
    if self.filter.is_empty() {
      return self.session.categories().iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .session
      .categories()
      .iter()
      .filter(|c| matcher.fuzzy_match(&c.name, &self.filter).is_some())
      .collect()
  }

  /// The product under the cursor in the filtered view.
  pub fn cursor_product(&self) -> Option<&Product> {
    self.filtered_products().get(self.product_cursor).copied()
  }

  /// The category under the cursor in the filtered view.
  pub fn cursor_category(&self) -> Option<&Category> {
    self.filtered_categories().get(self.category_cursor).copied()
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `false` when the app should quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Ctrl-C quits from anywhere, dialogs included.
    if key.modifiers.contains(KeyModifiers::CONTROL)
      && key.code == KeyCode::Char('c')
    {
      return Ok(false);
    }

    if self.dialog.is_some() {
      self.handle_dialog_key(key).await?;
      return Ok(true);
    }

    if self.filter_active {
      self.handle_filter_key(key);
      return Ok(true);
    }

    match self.screen {
      Screen::Products => self.handle_products_key(key).await,
      Screen::Categories => self.handle_categories_key(key).await,
    }
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.reset_cursor();
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.reset_cursor();
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.reset_cursor();
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.reset_cursor();
      }
      _ => {}
    }
  }

  async fn handle_products_key(
    &mut self,
    key: KeyEvent,
  ) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Tab => self.switch_screen(Screen::Categories),

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_products().len();
        if self.product_cursor + 1 < len {
          self.product_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.product_cursor = self.product_cursor.saturating_sub(1);
      }

      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.product_cursor = 0;
      }

      // Editing an existing product is open to any signed-in role.
      KeyCode::Enter | KeyCode::Char('e') => {
        if let Some(product) = self.cursor_product() {
          let draft = ProductDraft::edit(
            product,
            self.session.reference_website().cloned(),
          );
          self.dialog = Some(Dialog::product(draft));
        }
      }

      // Creating is gated on the resolved role, like the buttons it mirrors.
      KeyCode::Char('n') if self.session.can_manage_catalog() => {
        let draft =
          ProductDraft::new(self.session.reference_website().cloned());
        self.dialog = Some(Dialog::product(draft));
      }
      KeyCode::Char('a') if self.session.can_manage_catalog() => {
        let draft = ProductDraft::quick_add(self.quick_add_website.clone());
        self.dialog = Some(Dialog::product(draft));
      }

      KeyCode::Char('r') => self.refresh_products().await,

      _ => {}
    }
    Ok(true)
  }

  async fn handle_categories_key(
    &mut self,
    key: KeyEvent,
  ) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Tab => self.switch_screen(Screen::Products),

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_categories().len();
        if self.category_cursor + 1 < len {
          self.category_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.category_cursor = self.category_cursor.saturating_sub(1);
      }

      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.category_cursor = 0;
      }

      KeyCode::Enter | KeyCode::Char('e') => {
        if let Some(category) = self.cursor_category() {
          let draft = CategoryDraft::edit(category);
          self.dialog = Some(Dialog::category(draft));
        }
      }

      // Category creation is not role-gated.
      KeyCode::Char('n') => {
        self.dialog = Some(Dialog::category(CategoryDraft::new()));
      }

      KeyCode::Char('r') => self.refresh_categories().await,

      _ => {}
    }
    Ok(true)
  }

  async fn handle_dialog_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
    match key.code {
      // Discard the draft outright, like the Cancel button.
      KeyCode::Esc => {
        self.dialog = None;
        return Ok(());
      }
      KeyCode::Char('s')
        if key.modifiers.contains(KeyModifiers::CONTROL) =>
      {
        return self.submit_dialog().await;
      }
      _ => {}
    }

    let Some(dialog) = self.dialog.as_mut() else {
      return Ok(());
    };
    match dialog {
      Dialog::Product { draft, field, tech_cursor } => {
        edit_product(draft, field, tech_cursor, self.session.categories(), key);
      }
      Dialog::Category { draft, field } => edit_category(draft, field, key),
    }
    Ok(())
  }

  fn switch_screen(&mut self, screen: Screen) {
    self.screen = screen;
    self.filter.clear();
    self.filter_active = false;
    self.product_cursor = 0;
    self.category_cursor = 0;
  }

  fn reset_cursor(&mut self) {
    match self.screen {
      Screen::Products => self.product_cursor = 0,
      Screen::Categories => self.category_cursor = 0,
    }
  }

  // ── Submission ────────────────────────────────────────────────────────────

  /// Submit whichever dialog is open. Validation failures never reach the
  /// network, and the dialog only closes when the request succeeds.
  async fn submit_dialog(&mut self) -> anyhow::Result<()> {
    match &self.dialog {
      Some(Dialog::Category { draft, .. }) => {
        let action = match draft.submit_action() {
          Ok(action) => action,
          Err(error) => {
            debug!(%error, "category draft rejected");
            self.notice = Some(Notice::error(
              "Please fill all required fields",
              CATEGORY_NOTICE_TTL,
            ));
            return Ok(());
          }
        };
        let result = match &action {
          CategoryAction::Create(payload) => {
            self.client.create_category(payload).await.map(|_| ())
          }
          CategoryAction::Update(id, payload) => {
            self.client.update_category(id, payload).await
          }
        };
        match result {
          Ok(()) => {
            self.dialog = None;
            self.notice = Some(Notice::success(
              "Request successfully",
              CATEGORY_NOTICE_TTL,
            ));
            self.refresh_categories().await;
          }
          Err(error) => {
            warn!(%error, "category request failed");
            self.notice =
              Some(Notice::error("Request failed", CATEGORY_NOTICE_TTL));
          }
        }
      }

      Some(Dialog::Product { draft, .. }) => {
        let action = match draft.submit_action() {
          Ok(action) => action,
          Err(error) => {
            debug!(%error, "product draft rejected");
            self.notice = Some(Notice::error(
              "Please fill all required fields",
              PRODUCT_NOTICE_TTL,
            ));
            return Ok(());
          }
        };
        match action {
          ProductAction::QuickAddCategory(payload) => {
            match self.client.quick_add_category(&payload).await {
              Ok(category) => {
                // The new category joins the pick list right away; no
                // refetch, matching the rest of the quick-add flow.
                self.session.push_category(category);
                self.dialog = None;
                self.notice = Some(Notice::success(
                  "Request successfully",
                  PRODUCT_NOTICE_TTL,
                ));
              }
              Err(error) => {
                warn!(%error, "quick-add category failed");
                self.notice =
                  Some(Notice::error("Request failed", PRODUCT_NOTICE_TTL));
              }
            }
          }
          ProductAction::Create(payload) => {
            let result = self.client.create_product(&payload).await;
            self.finish_product_save(result).await;
          }
          ProductAction::Update(id, payload) => {
            let result = self.client.update_product(&id, &payload).await;
            self.finish_product_save(result).await;
          }
        }
      }

      None => {}
    }
    Ok(())
  }

  /// Shared tail of the product create and update paths.
  async fn finish_product_save(&mut self, result: shopkeep_client::Result<()>) {
    match result {
      Ok(()) => {
        self.dialog = None;
        self.notice = Some(Notice::success(
          "Product saved successfully",
          PRODUCT_NOTICE_TTL,
        ));
        self.refresh_products().await;
      }
      Err(error) => {
        warn!(%error, "product request failed");
        self.notice =
          Some(Notice::error("Failed to save product", PRODUCT_NOTICE_TTL));
      }
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Refetch the product list. Failures keep the previous list so a freshly
  /// shown notice is not clobbered by an empty table.
  pub async fn refresh_products(&mut self) {
    match self.client.products().await {
      Ok(products) => {
        self.products = products;
        self.clamp_cursors();
      }
      Err(error) => warn!(%error, "product refresh failed"),
    }
  }

  /// Refetch the category list into the session.
  pub async fn refresh_categories(&mut self) {
    match self.client.categories().await {
      Ok(categories) => {
        self.session.replace_categories(categories);
        self.clamp_cursors();
      }
      Err(error) => warn!(%error, "category refresh failed"),
    }
  }

  fn clamp_cursors(&mut self) {
    let products = self.filtered_products().len();
    self.product_cursor = self.product_cursor.min(products.saturating_sub(1));
    let categories = self.filtered_categories().len();
    self.category_cursor =
      self.category_cursor.min(categories.saturating_sub(1));
  }
}

// ─── Dialog Editing ─────────────────────────────────────────────────────────

/// Apply an editing key to the product dialog. Selection fields take
/// Left/Right (and Space for the technology toggle); everything else is
/// plain text input.
fn edit_product(
  draft: &mut ProductDraft,
  field: &mut ProductField,
  tech_cursor: &mut usize,
  categories: &[Category],
  key: KeyEvent,
) {
  let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

  // Quick-add keeps the dialog shell but only the name field is live.
  if draft.is_quick_add() {
    match key.code {
      KeyCode::Char(c) if !ctrl => draft.product_name.push(c),
      KeyCode::Backspace => {
        draft.product_name.pop();
      }
      _ => {}
    }
    return;
  }

  match key.code {
    KeyCode::Tab | KeyCode::Down | KeyCode::Enter => *field = field.next(),
    KeyCode::BackTab | KeyCode::Up => *field = field.prev(),

    KeyCode::Left | KeyCode::Right
      if matches!(
        field,
        ProductField::Technologies
          | ProductField::Category
          | ProductField::Subcategory
      ) =>
    {
      select_product_option(draft, *field, tech_cursor, categories, key.code);
    }
    KeyCode::Char(' ') if matches!(field, ProductField::Technologies) => {
      select_product_option(draft, *field, tech_cursor, categories, key.code);
    }

    KeyCode::Char(c) if !ctrl => {
      if let Some(buffer) = text_buffer(draft, *field) {
        buffer.push(c);
      }
    }
    KeyCode::Backspace => {
      if let Some(buffer) = text_buffer(draft, *field) {
        buffer.pop();
      }
    }
    _ => {}
  }
}

/// The plain-text buffer behind `field`, if it has one.
fn text_buffer(
  draft: &mut ProductDraft,
  field: ProductField,
) -> Option<&mut String> {
  match field {
    ProductField::Name => Some(&mut draft.product_name),
    ProductField::Description => Some(&mut draft.description),
    ProductField::Images => Some(&mut draft.images),
    ProductField::Price => Some(&mut draft.price),
    ProductField::Discount => Some(&mut draft.discount),
    ProductField::Overview => Some(&mut draft.overview),
    ProductField::Support => Some(&mut draft.support),
    ProductField::Reviews => Some(&mut draft.reviews),
    ProductField::Specification => Some(&mut draft.specification),
    ProductField::Technologies
    | ProductField::Category
    | ProductField::Subcategory => None,
  }
}

fn select_product_option(
  draft: &mut ProductDraft,
  field: ProductField,
  tech_cursor: &mut usize,
  categories: &[Category],
  code: KeyCode,
) {
  match field {
    ProductField::Technologies => {
      let total = technology::all().count();
      match code {
        KeyCode::Left => *tech_cursor = (*tech_cursor + total - 1) % total,
        KeyCode::Right => *tech_cursor = (*tech_cursor + 1) % total,
        KeyCode::Char(' ') => {
          if let Some(tag) = technology::all().nth(*tech_cursor) {
            draft.toggle_technology(tag);
          }
        }
        _ => {}
      }
    }

    ProductField::Category => {
      if categories.is_empty() {
        return;
      }
      let current = draft
        .category()
        .and_then(|id| categories.iter().position(|c| &c.id == id));
      if let Some(i) = step_selection(current, categories.len(), code) {
        draft.select_category(categories[i].id.clone());
      }
    }

    ProductField::Subcategory => {
      let options = draft.subcategory_options(categories);
      if options.is_empty() {
        return;
      }
      let current = draft.subcategory().and_then(|id| {
        options.iter().position(|s| s.id.as_ref() == Some(id))
      });
      if let Some(i) = step_selection(current, options.len(), code) {
        // Options without a persisted id cannot be referenced yet.
        if let Some(id) = options[i].id.clone() {
          draft.select_subcategory(id);
        }
      }
    }

    _ => {}
  }
}

/// Step a selection index left or right with wrapping. `None` means no
/// current choice, so the first step lands on an end of the list.
fn step_selection(
  current: Option<usize>,
  len: usize,
  code: KeyCode,
) -> Option<usize> {
  match code {
    KeyCode::Right => Some(current.map_or(0, |i| (i + 1) % len)),
    KeyCode::Left => Some(current.map_or(len - 1, |i| (i + len - 1) % len)),
    _ => None,
  }
}

/// Apply an editing key to the category dialog.
fn edit_category(
  draft: &mut CategoryDraft,
  field: &mut CategoryField,
  key: KeyEvent,
) {
  let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
  match key.code {
    // Row management mirrors the add/remove buttons beside the grid.
    KeyCode::Char('n') if ctrl => {
      draft.add_row();
      *field = CategoryField::Row(draft.rows().len() - 1, RowColumn::Name);
    }
    KeyCode::Char('d') if ctrl => {
      if let CategoryField::Row(index, _) = *field {
        draft.remove_row(index);
        let last = draft.rows().len() - 1;
        *field = CategoryField::Row(index.min(last), RowColumn::Name);
      }
    }

    KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
      *field = field.next(draft.rows().len());
    }
    KeyCode::BackTab | KeyCode::Up => {
      *field = field.prev(draft.rows().len());
    }

    KeyCode::Char(c) if !ctrl => {
      if let Some(buffer) = category_buffer(draft, *field) {
        buffer.push(c);
      }
    }
    KeyCode::Backspace => {
      if let Some(buffer) = category_buffer(draft, *field) {
        buffer.pop();
      }
    }
    _ => {}
  }
}

fn category_buffer(
  draft: &mut CategoryDraft,
  field: CategoryField,
) -> Option<&mut String> {
  match field {
    CategoryField::Name => Some(&mut draft.name),
    CategoryField::Description => Some(&mut draft.description),
    CategoryField::Row(index, column) => {
      let row = draft.row_mut(index)?;
      Some(match column {
        RowColumn::Name => &mut row.name,
        RowColumn::Description => &mut row.description,
      })
    }
  }
}
