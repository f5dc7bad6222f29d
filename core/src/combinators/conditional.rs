// pipewright/src/combinators/conditional.rs

//! Conditional execution (`when`) and two-way branching (`if_else`).

use crate::core::control::Control;
use crate::core::history::History;
use crate::core::middleware::{boxed, Middleware};
use std::sync::Arc;
use tracing::{event, Level};

/// Runs `inner` only when `condition` holds for the current value and
/// history; otherwise passes the value through unchanged.
pub fn when<D, I, H, P>(condition: P, inner: Middleware<D, I, I, H>) -> Middleware<D, I, I, H>
where
  D: Send + Sync + 'static,
  I: Send + 'static,
  H: Send + Sync + 'static,
  P: Fn(&I, &History<H>) -> bool + Send + Sync + 'static,
{
  boxed(move |deps: Arc<D>, input: I, history: History<H>| {
    if condition(&input, &history) {
      event!(Level::TRACE, "Condition met, running wrapped middleware.");
      inner(deps, input, history)
    } else {
      event!(Level::TRACE, "Condition not met, passing value through.");
      Box::pin(async move { Ok(Control::Continue(input)) })
    }
  })
}

/// Runs exactly one of `then_branch` / `else_branch`, chosen by `condition`,
/// and returns that branch's result.
pub fn if_else<D, I, O, H, P>(
  condition: P,
  then_branch: Middleware<D, I, O, H>,
  else_branch: Middleware<D, I, O, H>,
) -> Middleware<D, I, O, H>
where
  D: Send + Sync + 'static,
  I: Send + 'static,
  O: Send + 'static,
  H: Send + Sync + 'static,
  P: Fn(&I, &History<H>) -> bool + Send + Sync + 'static,
{
  boxed(move |deps: Arc<D>, input: I, history: History<H>| {
    let take_then = condition(&input, &history);
    event!(Level::TRACE, take_then, "Branch selected.");
    if take_then {
      then_branch(deps, input, history)
    } else {
      else_branch(deps, input, history)
    }
  })
}
