//! The product dialog overlay, including the quick-add category shell.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};
use shopkeep_core::{identity::WebsiteId, product::ProductDraft, technology};

use super::{centered_rect, field_line};
use crate::app::{App, ProductField};

pub fn draw(
  f: &mut Frame,
  area: Rect,
  app: &App,
  draft: &ProductDraft,
  field: ProductField,
  tech_cursor: usize,
) {
  let overlay = centered_rect(area, 72, 80);
  f.render_widget(Clear, overlay);

  let title = if draft.is_quick_add() {
    " Add Category "
  } else if draft.is_edit() {
    " Update Product "
  } else {
    " New Product "
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(overlay);
  f.render_widget(block, overlay);

  if draft.is_quick_add() {
    draw_quick_add(f, inner, draft);
    return;
  }

  let lines = vec![
    field_line(
      "Product Name",
      &draft.product_name,
      field == ProductField::Name,
    ),
    field_line(
      "Description",
      &draft.description,
      field == ProductField::Description,
    ),
    field_line(
      "Images (comma-separated)",
      &draft.images,
      field == ProductField::Images,
    ),
    field_line("Price", &draft.price, field == ProductField::Price),
    field_line(
      "Discount (%)",
      &draft.discount,
      field == ProductField::Discount,
    ),
    sale_price_line(draft),
    Line::from(""),
    technology_line(draft, field == ProductField::Technologies, tech_cursor),
    category_line(app, draft, field == ProductField::Category),
    subcategory_line(app, draft, field == ProductField::Subcategory),
    Line::from(""),
    field_line("Overview", &draft.overview, field == ProductField::Overview),
    field_line("Support", &draft.support, field == ProductField::Support),
    field_line("Reviews", &draft.reviews, field == ProductField::Reviews),
    field_line(
      "Specification",
      &draft.specification,
      field == ProductField::Specification,
    ),
    Line::from(""),
    storefront_line(draft),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}

/// Quick-add keeps the product dialog shell but only exposes the name.
fn draw_quick_add(f: &mut Frame, inner: Rect, draft: &ProductDraft) {
  let lines = vec![
    Line::from(""),
    field_line("Category name", &draft.product_name, true),
    Line::from(""),
    Line::from(Span::styled(
      "Creates a category for the configured storefront.",
      Style::default().fg(Color::DarkGray),
    )),
    storefront_line(draft),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}

fn label_span(label: &'static str, focused: bool) -> Span<'static> {
  let style = if focused {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  Span::styled(format!("{label:<26}"), style)
}

/// Live preview of the derived sale price; blank until the price parses.
fn sale_price_line(draft: &ProductDraft) -> Line<'static> {
  let preview = draft
    .sale_price_preview()
    .map(|price| format!("{price:.2}"))
    .unwrap_or_default();
  Line::from(vec![
    label_span("Sale price", false),
    Span::styled(preview, Style::default().fg(Color::Green)),
  ])
}

fn technology_line(
  draft: &ProductDraft,
  focused: bool,
  cursor: usize,
) -> Line<'static> {
  let mut spans = vec![label_span("Technologies", focused)];
  if focused {
    if let Some(tag) = technology::all().nth(cursor) {
      let marker = if draft.has_technology(tag) { "x" } else { " " };
      spans.push(Span::styled(
        format!("< [{marker}] {tag} >  "),
        Style::default().fg(Color::Yellow),
      ));
    }
  }
  let selected = if draft.technologies().is_empty() {
    "(none)".to_string()
  } else {
    draft.technologies().join(", ")
  };
  spans.push(Span::raw(selected));
  Line::from(spans)
}

fn category_line(
  app: &App,
  draft: &ProductDraft,
  focused: bool,
) -> Line<'static> {
  let name = draft
    .category()
    .and_then(|id| app.session.categories().iter().find(|c| &c.id == id))
    .map(|c| c.name.clone())
    .unwrap_or_else(|| "(none)".to_string());
  Line::from(vec![
    label_span("Category", focused),
    choice_span(name, focused),
  ])
}

fn subcategory_line(
  app: &App,
  draft: &ProductDraft,
  focused: bool,
) -> Line<'static> {
  let options = draft.subcategory_options(app.session.categories());
  let name = draft
    .subcategory()
    .and_then(|id| options.iter().find(|s| s.id.as_ref() == Some(id)))
    .map(|s| s.name.clone())
    .unwrap_or_else(|| {
      if options.is_empty() {
        "(pick a category first)".to_string()
      } else {
        "(none)".to_string()
      }
    });
  Line::from(vec![
    label_span("Subcategory", focused),
    choice_span(name, focused),
  ])
}

fn choice_span(name: String, focused: bool) -> Span<'static> {
  if focused {
    Span::styled(format!("< {name} >"), Style::default().fg(Color::Yellow))
  } else {
    Span::raw(name)
  }
}

/// The reference website is stamped by the session or the configuration,
/// never edited here; showing it makes a missing-fields error explainable.
fn storefront_line(draft: &ProductDraft) -> Line<'static> {
  let website = draft
    .reference_website
    .as_ref()
    .map(WebsiteId::as_str)
    .unwrap_or("(not resolved)");
  Line::from(Span::styled(
    format!("{:<26}{website}", "Storefront"),
    Style::default().fg(Color::DarkGray),
  ))
}
