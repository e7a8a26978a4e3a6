//! The product table.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use shopkeep_core::{category::Category, product::Product};

use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_products();

  let title = if app.filter.is_empty() {
    format!(" Products ({}) ", app.products.len())
  } else {
    format!(" Products ({}/{}) ", filtered.len(), app.products.len())
  };

  let block = Block::default()
    .title(title)
    .title_bottom(Line::from(Span::styled(
      " name / category / price / sale price / discount ",
      Style::default().fg(Color::DarkGray),
    )))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  // Carve a one-line filter bar off the bottom while a query is live.
  let (list_area, filter_area) =
    if app.filter_active || !app.filter.is_empty() {
      let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);
      (chunks[0], Some(chunks[1]))
    } else {
      (inner, None)
    };

  let items: Vec<ListItem> = filtered
    .iter()
    .map(|product| {
      ListItem::new(Line::from(vec![
        Span::raw(format!("{:<32.32}", product.product_name)),
        Span::styled(
          format!(
            "{:<20.20}",
            category_label(product, app.session.categories())
          ),
          Style::default().fg(Color::Cyan),
        ),
        Span::raw(format!("{:>10.2}", product.price)),
        Span::styled(
          format!("{:>10.2}", product.actual_price),
          Style::default().fg(Color::Green),
        ),
        Span::styled(
          format!("{:>6.0}%", product.discount),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();

  let list = List::new(items)
    .highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("");

  let mut state = ListState::default();
  state.select(if filtered.is_empty() {
    None
  } else {
    Some(app.product_cursor)
  });
  f.render_stateful_widget(list, list_area, &mut state);

  if let Some(filter_area) = filter_area {
    f.render_widget(
      Paragraph::new(format!("/{}_", app.filter))
        .style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }
}

/// Display label for a product's category: the embedded name when the
/// backend populated one, otherwise a lookup in the session's list.
fn category_label<'a>(
  product: &'a Product,
  categories: &'a [Category],
) -> &'a str {
  let Some(category) = &product.category else {
    return "—";
  };
  if let Some(name) = category.name() {
    return name;
  }
  categories
    .iter()
    .find(|c| &c.id == category.id())
    .map(|c| c.name.as_str())
    .unwrap_or("—")
}
