//! Error type for `shopkeep-client`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Transport failure, timeout, or an undecodable response body.
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The backend answered with a non-success status.
  #[error("{method} {path} → {status}")]
  Status {
    method: &'static str,
    path: String,
    status: reqwest::StatusCode,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
