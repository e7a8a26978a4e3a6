//! TUI rendering — orchestrates all panes.

pub mod categories;
pub mod category_form;
pub mod product_form;
pub mod products;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};
use shopkeep_core::session::SessionPhase;

use crate::app::{App, Dialog, NoticeKind, Screen};

/// Main draw function, called once per frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::Products => products::draw(f, rows[1], app),
    Screen::Categories => categories::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);

  // Dialogs render last, over the table.
  match &app.dialog {
    Some(Dialog::Product { draft, field, tech_cursor }) => {
      product_form::draw(f, area, app, draft, *field, *tech_cursor);
    }
    Some(Dialog::Category { draft, field }) => {
      category_form::draw(f, area, draft, *field);
    }
    None => {}
  }
}

// ─── Chrome ─────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let left = Span::styled(
    " shopkeep",
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
  );

  let logo = app.session.logo_url();
  let middle = if logo.is_empty() {
    String::new()
  } else {
    format!("  {logo}")
  };

  let date = Local::now().format("%Y-%m-%d").to_string();
  let right = Span::styled(
    format!("{}  {date} ", identity_label(app)),
    Style::default().fg(Color::Gray),
  );

  let pad = area
    .width
    .saturating_sub(left.content.len() as u16)
    .saturating_sub(middle.len() as u16)
    .saturating_sub(right.content.len() as u16);

  let line = Line::from(vec![
    left,
    Span::styled(middle, Style::default().fg(Color::Gray)),
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);
  f.render_widget(Paragraph::new(line), inner);
}

/// Who the header says is signed in.
fn identity_label(app: &App) -> String {
  match app.session.phase() {
    SessionPhase::NoToken => "not signed in".to_string(),
    SessionPhase::ResolutionFailed => "sign-in failed".to_string(),
    _ => app
      .session
      .identity()
      .map(|identity| identity.display_name().to_string())
      .unwrap_or_else(|| "resolving...".to_string()),
  }
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = status_hints(app);

  let line = match &app.notice {
    // A live notice replaces the hints until it expires.
    Some(notice) => {
      let color = match notice.kind {
        NoticeKind::Success => Color::Green,
        NoticeKind::Error => Color::Red,
      };
      Line::from(vec![
        mode_span(mode_label),
        Span::styled(
          format!("  {}", notice.text),
          Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
      ])
    }
    None => Line::from(vec![
      mode_span(mode_label),
      Span::styled(
        format!("  {hints}"),
        Style::default().fg(Color::DarkGray),
      ),
    ]),
  };

  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

fn mode_span(label: &str) -> Span<'static> {
  Span::styled(
    format!(" {label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  )
}

fn status_hints(app: &App) -> (&'static str, String) {
  if let Some(dialog) = &app.dialog {
    let hints = match dialog {
      Dialog::Product { draft, .. } if draft.is_quick_add() => {
        "type the category name  Ctrl-S submit  Esc cancel"
      }
      Dialog::Product { .. } => {
        "Tab/↓ next  ↑ prev  ←/→ choose  Space toggle  Ctrl-S submit  Esc cancel"
      }
      Dialog::Category { .. } => {
        "Tab/↓ next  ↑ prev  Ctrl-N add row  Ctrl-D remove row  Ctrl-S submit  Esc cancel"
      }
    };
    return ("EDIT", hints.to_string());
  }

  if app.filter_active {
    return ("SEARCH", "type to filter  Enter apply  Esc clear".to_string());
  }

  // Gated actions stay out of the hints when the role lacks them, the
  // keyboard analog of not rendering the button.
  let mut hints = String::from("↑↓/jk move  / search  Enter edit");
  match app.screen {
    Screen::Products => {
      if app.session.can_manage_catalog() {
        hints.push_str("  n new  a add category");
      }
    }
    Screen::Categories => hints.push_str("  n new"),
  }
  hints.push_str("  r refresh  Tab switch  q quit");

  let label = match app.screen {
    Screen::Products => "PRODUCTS",
    Screen::Categories => "CATEGORIES",
  };
  (label, hints)
}

// ─── Shared helpers ─────────────────────────────────────────────────────────

/// A labelled text field line for the dialog overlays. The focused field
/// shows a trailing input cursor.
pub(crate) fn field_line<'a>(
  label: &'a str,
  value: &'a str,
  focused: bool,
) -> Line<'a> {
  let label_style = if focused {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let mut spans = vec![
    Span::styled(format!("{label:<26}"), label_style),
    Span::raw(value),
  ];
  if focused {
    spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
  }
  Line::from(spans)
}

/// Centered overlay rect, sized as percentages of `area`.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
  let vert = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Percentage((100 - height) / 2),
      Constraint::Percentage(height),
      Constraint::Percentage((100 - height) / 2),
    ])
    .split(area);
  let horiz = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Percentage((100 - width) / 2),
      Constraint::Percentage(width),
      Constraint::Percentage((100 - width) / 2),
    ])
    .split(vert[1]);
  horiz[1]
}
