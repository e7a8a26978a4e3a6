//! The category dialog overlay with its subcategory row grid.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};
use shopkeep_core::category::{CategoryDraft, Subcategory};

use super::{centered_rect, field_line};
use crate::app::{CategoryField, RowColumn};

pub fn draw(
  f: &mut Frame,
  area: Rect,
  draft: &CategoryDraft,
  field: CategoryField,
) {
  let overlay = centered_rect(area, 72, 70);
  f.render_widget(Clear, overlay);

  let title = if draft.is_edit() {
    " Update Category "
  } else {
    " New Category "
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(overlay);
  f.render_widget(block, overlay);

  let mut lines = vec![field_line(
    "Name",
    &draft.name,
    field == CategoryField::Name,
  )];
  // Live required-field hint, not a submit error.
  if draft.name.is_empty() {
    lines.push(Line::from(Span::styled(
      "  Name is required",
      Style::default().fg(Color::Red),
    )));
  }
  lines.push(field_line(
    "Description",
    &draft.description,
    field == CategoryField::Description,
  ));
  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    "Subcategories",
    Style::default().add_modifier(Modifier::BOLD),
  )));
  lines.push(Line::from(Span::styled(
    "  rows with an empty name are dropped at submit",
    Style::default().fg(Color::DarkGray),
  )));
  for (index, row) in draft.rows().iter().enumerate() {
    lines.push(row_line(index, row, field));
  }
  f.render_widget(Paragraph::new(lines), inner);
}

fn row_line(
  index: usize,
  row: &Subcategory,
  field: CategoryField,
) -> Line<'static> {
  let name_focused = field == CategoryField::Row(index, RowColumn::Name);
  let desc_focused =
    field == CategoryField::Row(index, RowColumn::Description);
  Line::from(vec![
    Span::styled(
      format!("{:>3}. ", index + 1),
      Style::default().fg(Color::DarkGray),
    ),
    cell_span(&row.name, name_focused),
    cell_span(&row.description, desc_focused),
  ])
}

fn cell_span(value: &str, focused: bool) -> Span<'static> {
  let text = if focused {
    format!("{:<30.30}", format!("{value}_"))
  } else {
    format!("{value:<30.30}")
  };
  let style = if focused {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
  } else {
    Style::default()
  };
  Span::styled(text, style)
}
