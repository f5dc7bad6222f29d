// pipewright/src/core/control.rs

//! Defines the signal a middleware uses to continue or stop a pipeline, and the
//! outcome of a full pipeline run.

use std::fmt;

/// Cooperative request to end the nearest enclosing pipeline early.
///
/// Carries only a message. It is told apart from ordinary failures by being a
/// distinct type, never by its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopSignal {
  message: String,
}

impl StopSignal {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }

  pub fn message(&self) -> &str {
    &self.message
  }
}

impl fmt::Display for StopSignal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.message)
  }
}

/// What a middleware step produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control<T> {
  /// The step produced the next value; the pipeline carries on with it.
  Continue(T),
  /// The step asked the pipeline to stop. The enclosing executor returns the
  /// last value it had before this step ran.
  Stop(StopSignal),
}

impl<T> Control<T> {
  pub fn stop(message: impl Into<String>) -> Self {
    Control::Stop(StopSignal::new(message))
  }

  pub fn is_stop(&self) -> bool {
    matches!(self, Control::Stop(_))
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Control<U> {
    match self {
      Control::Continue(value) => Control::Continue(f(value)),
      Control::Stop(signal) => Control::Stop(signal),
    }
  }

  /// Returns the produced value, or `None` for a stop.
  pub fn into_value(self) -> Option<T> {
    match self {
      Control::Continue(value) => Some(value),
      Control::Stop(_) => None,
    }
  }
}

/// Outcome of a full pipeline execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineResult<T> {
  /// Every middleware ran; holds the final value.
  Completed(T),
  /// A middleware returned `Control::Stop`. `value` is the running value at the
  /// moment the signal was raised.
  Stopped { value: T, signal: StopSignal },
}

impl<T> PipelineResult<T> {
  pub fn is_stopped(&self) -> bool {
    matches!(self, PipelineResult::Stopped { .. })
  }

  pub fn value(&self) -> &T {
    match self {
      PipelineResult::Completed(value) | PipelineResult::Stopped { value, .. } => value,
    }
  }

  pub fn into_value(self) -> T {
    match self {
      PipelineResult::Completed(value) | PipelineResult::Stopped { value, .. } => value,
    }
  }
}
