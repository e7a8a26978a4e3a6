//! `shopkeep` — a terminal console for the storefront catalog.
//!
//! Talks to the catalog backend over HTTP and lets an operator browse,
//! create, and update products and categories from the keyboard.
//!
//! # Usage
//!
//! ```text
//! shopkeep --url http://localhost:5000 --token <session token>
//! shopkeep --config ~/.config/shopkeep/config.toml
//! ```
//!
//! Flags override the config file, which overrides the defaults.

mod app;
mod ui;

use std::{
  io,
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
  },
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use shopkeep_client::{CatalogClient, ClientConfig};
use shopkeep_core::identity::WebsiteId;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::app::App;

// ─── CLI ────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "shopkeep", version, about = "Catalog console for the storefront backend")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE")]
  config:            Option<PathBuf>,
  /// Base URL of the catalog backend.
  #[arg(long, env = "SHOPKEEP_URL")]
  url:               Option<String>,
  /// Bearer token for the `Authorization` header.
  #[arg(long, env = "SHOPKEEP_TOKEN")]
  token:             Option<String>,
  /// Website id stamped on quick-added categories.
  #[arg(long, env = "SHOPKEEP_REFERENCE_WEBSITE")]
  reference_website: Option<String>,
  /// Append logs to this file instead of swallowing them.
  #[arg(long, value_name = "FILE")]
  log_file:          Option<PathBuf>,
}

#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:               String,
  #[serde(default)]
  token:             String,
  #[serde(default)]
  reference_website: String,
}

// ─── Logging ────────────────────────────────────────────────────────────────

/// Set up file logging when `--log-file` is given. Stdout belongs to the
/// terminal UI, so without a file the logs go nowhere.
///
/// The returned guard must stay alive for the writer to flush.
fn init_logging(path: Option<&Path>) -> Result<Option<WorkerGuard>> {
  let Some(path) = path else {
    return Ok(None);
  };
  let file = std::fs::File::create(path)
    .with_context(|| format!("creating log file {}", path.display()))?;
  let (writer, guard) = tracing_appender::non_blocking(file);
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(writer)
    .with_ansi(false)
    .init();
  Ok(Some(guard))
}

// ─── Entry Point ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let _log_guard = init_logging(args.log_file.as_deref())?;

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| "http://localhost:5000".to_string());
  let token = args
    .token
    .or_else(|| (!file_cfg.token.is_empty()).then(|| file_cfg.token.clone()))
    .unwrap_or_default();
  let quick_add_website = args
    .reference_website
    .or_else(|| {
      (!file_cfg.reference_website.is_empty())
        .then(|| file_cfg.reference_website.clone())
    })
    .map(WebsiteId);

  let client = CatalogClient::new(ClientConfig { base_url, token })?;
  let mut app = App::new(client, quick_add_website);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)
    .context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Resolve the session and load the tables. A failed bootstrap still
  // leaves a usable (empty) console, so the loop runs regardless.
  app.bootstrap().await;
  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore the terminal even if the loop errored.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event Loop ─────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    app.tick();
    terminal
      .draw(|f| ui::draw(f, app))
      .context("drawing frame")?;

    // Poll for input without starving the async runtime.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event {
      if !app.handle_key(key).await? {
        break;
      }
    }
  }
  Ok(())
}
