// pipewright/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Ordinary (non-stop) failures raised by middleware.
///
/// A stop request is never a `PipeError`; it travels as `Control::Stop` instead.
#[derive(Debug, Error)]
pub enum PipeError {
  /// Raised by `common::throw_error`.
  #[error("{message}")]
  Thrown { message: String },

  #[error("Error in middleware. Source: {source}")]
  Middleware {
    #[source]
    source: AnyhowError,
  },
}

impl PipeError {
  pub fn thrown(message: impl Into<String>) -> Self {
    PipeError::Thrown {
      message: message.into(),
    }
  }

  /// Attempts to view the wrapped user error as `E`.
  pub fn downcast_ref<E>(&self) -> Option<&E>
  where
    E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
  {
    match self {
      PipeError::Middleware { source } => source.downcast_ref::<E>(),
      PipeError::Thrown { .. } => None,
    }
  }
}

impl From<AnyhowError> for PipeError {
  fn from(err: AnyhowError) -> Self {
    // Unwrap a PipeError that was smuggled through anyhow so `?` does not nest it.
    match err.downcast::<PipeError>() {
      Ok(pipe_err) => pipe_err,
      Err(source) => PipeError::Middleware { source },
    }
  }
}

pub type PipeResult<T, E = PipeError> = std::result::Result<T, E>;
