//! Error types for `shopkeep-core`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// A draft was submitted with required fields still blank. Carries the
  /// display labels of the offending fields so the editor can highlight them.
  #[error("missing required fields: {}", .0.join(", "))]
  MissingFields(Vec<&'static str>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
