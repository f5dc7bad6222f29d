// pipewright/src/combinators/lookup.rs

//! History lookup: `ask` reads an earlier value back out of the queue.

use crate::core::control::Control;
use crate::core::history::History;
use crate::core::middleware::{boxed, Middleware};
use std::sync::Arc;

/// Produces the history entry at `index`, ignoring the current value.
///
/// Indexing is absolute: 0 is the pipeline's initial value, 1 the value the
/// second step started with, and so on. Yields `None` when the history has no
/// such entry.
pub fn ask<D, I, H>(index: usize) -> Middleware<D, I, Option<H>, H>
where
  D: Send + Sync + 'static,
  I: Send + 'static,
  H: Clone + Send + Sync + 'static,
{
  boxed(move |_deps: Arc<D>, _input: I, history: History<H>| {
    let found = history.get(index).cloned();
    Box::pin(async move { Ok(Control::Continue(found)) })
  })
}
