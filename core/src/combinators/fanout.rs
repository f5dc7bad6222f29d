// pipewright/src/combinators/fanout.rs

//! Fan-out over several middleware sharing one input: `concurrency`
//! (overlapping, tolerant of stops) and `merge` (one at a time, strict).

use crate::core::control::Control;
use crate::core::history::History;
use crate::core::middleware::{boxed, Middleware};
use crate::error::PipeError;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{event, Level};

/// Runs every branch against the same input with all of them in flight at
/// once, and collects one slot per branch in declaration order.
///
/// A branch that stops yields `None` in its slot. The combinator waits for
/// every branch to settle; if any branch failed, the first failure in
/// declaration order is returned and the other results are dropped. Branches
/// share the caller's task, so they interleave at await points rather than
/// running on separate threads.
pub fn concurrency<D, I, O, H>(branches: Vec<Middleware<D, I, O, H>>) -> Middleware<D, I, Vec<Option<O>>, H>
where
  D: Send + Sync + 'static,
  I: Clone + Send + 'static,
  O: Send + 'static,
  H: Send + Sync + 'static,
{
  let branches: Arc<[Middleware<D, I, O, H>]> = branches.into();
  boxed(move |deps: Arc<D>, input: I, history: History<H>| {
    let in_flight = branches
      .iter()
      .map(|branch| branch(Arc::clone(&deps), input.clone(), history.clone()))
      .collect::<Vec<_>>();
    Box::pin(async move {
      let settled = join_all(in_flight).await;
      let mut slots = Vec::with_capacity(settled.len());
      for (branch_idx, outcome) in settled.into_iter().enumerate() {
        match outcome {
          Ok(Control::Continue(value)) => slots.push(Some(value)),
          Ok(Control::Stop(signal)) => {
            event!(Level::DEBUG, branch_index = branch_idx, message = %signal, "Concurrent branch stopped.");
            slots.push(None);
          }
          Err(err) => {
            event!(Level::ERROR, branch_index = branch_idx, error = %err, "Concurrent branch failed.");
            return Err(err);
          }
        }
      }
      Ok(Control::Continue(slots))
    })
  })
}

/// Runs the branches one after another against the same input and collects
/// their results in order.
///
/// The first failure or stop from any branch ends the merge at once: later
/// branches never run, and the stop or error propagates outward.
pub fn merge<D, I, O, H>(branches: Vec<Middleware<D, I, O, H>>) -> Middleware<D, I, Vec<O>, H>
where
  D: Send + Sync + 'static,
  I: Clone + Send + 'static,
  O: Send + 'static,
  H: Send + Sync + 'static,
{
  let branches: Arc<[Middleware<D, I, O, H>]> = branches.into();
  boxed(move |deps: Arc<D>, input: I, history: History<H>| {
    let branches = Arc::clone(&branches);
    Box::pin(async move {
      let mut list = Vec::with_capacity(branches.len());
      for (branch_idx, branch) in branches.iter().enumerate() {
        match branch(Arc::clone(&deps), input.clone(), history.clone()).await? {
          Control::Continue(value) => list.push(value),
          Control::Stop(signal) => {
            event!(Level::DEBUG, branch_index = branch_idx, message = %signal, "Merge branch stopped.");
            return Ok(Control::Stop(signal));
          }
        }
      }
      Ok::<_, PipeError>(Control::Continue(list))
    })
  })
}
