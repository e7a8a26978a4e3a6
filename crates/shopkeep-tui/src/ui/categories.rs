//! The category table.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_categories();
  let total = app.session.categories().len();

  let title = if app.filter.is_empty() {
    format!(" Categories ({total}) ")
  } else {
    format!(" Categories ({}/{}) ", filtered.len(), total)
  };

  let block = Block::default()
    .title(title)
    .title_bottom(Line::from(Span::styled(
      " name / description / subcategories ",
      Style::default().fg(Color::DarkGray),
    )))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

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
    .map(|category| {
      ListItem::new(Line::from(vec![
        Span::raw(format!("{:<24.24}", category.name)),
        Span::styled(
          format!("{:<44.44}", category.description),
          Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
          format!("{:>4}", category.subcategories.len()),
          Style::default().fg(Color::Cyan),
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
    Some(app.category_cursor)
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
