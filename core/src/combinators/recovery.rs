// pipewright/src/combinators/recovery.rs

//! Error recovery (`try_catch`).
//!
//! Unlike the sequential executor, recovery treats a stop request as just
//! another fault: a `Control::Stop` from the primary middleware is handed to
//! the recovery middleware instead of ending the pipeline.

use crate::core::control::{Control, StopSignal};
use crate::core::history::History;
use crate::core::middleware::{boxed, Middleware};
use crate::error::{PipeError, PipeResult};
use std::fmt;
use std::sync::Arc;
use tracing::{event, Level};

/// Why the primary middleware of a `try_catch` did not produce a value.
#[derive(Debug)]
pub enum Fault {
  Stopped(StopSignal),
  Failed(PipeError),
}

impl Fault {
  pub fn is_stop(&self) -> bool {
    matches!(self, Fault::Stopped(_))
  }

  /// Re-raises the fault: a stop becomes `Control::Stop` again and a failure
  /// becomes `Err`.
  pub fn into_control<T>(self) -> PipeResult<Control<T>> {
    match self {
      Fault::Stopped(signal) => Ok(Control::Stop(signal)),
      Fault::Failed(err) => Err(err),
    }
  }
}

impl fmt::Display for Fault {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Fault::Stopped(signal) => write!(f, "stopped: {}", signal),
      Fault::Failed(err) => write!(f, "{}", err),
    }
  }
}

/// Input handed to a recovery middleware: the fault, plus the value the
/// primary middleware was given. The history is passed alongside unchanged.
#[derive(Debug)]
pub struct Caught<I> {
  pub fault: Fault,
  pub input: I,
}

/// Runs `primary`; if it fails or asks to stop, runs `recovery` with the
/// fault and the original arguments and returns its result instead.
pub fn try_catch<D, I, O, H>(
  primary: Middleware<D, I, O, H>,
  recovery: Middleware<D, Caught<I>, O, H>,
) -> Middleware<D, I, O, H>
where
  D: Send + Sync + 'static,
  I: Clone + Send + 'static,
  O: Send + 'static,
  H: Send + Sync + 'static,
{
  boxed(move |deps: Arc<D>, input: I, history: History<H>| {
    let primary = Arc::clone(&primary);
    let recovery = Arc::clone(&recovery);
    Box::pin(async move {
      let fault = match primary(Arc::clone(&deps), input.clone(), history.clone()).await {
        Ok(Control::Continue(output)) => return Ok(Control::Continue(output)),
        Ok(Control::Stop(signal)) => Fault::Stopped(signal),
        Err(err) => Fault::Failed(err),
      };
      event!(Level::DEBUG, fault = %fault, "Primary middleware faulted, running recovery.");
      recovery(deps, Caught { fault, input }, history).await
    })
  })
}
