// pipewright/src/combinators/looping.rs

//! Pre-test (`loop_while`) and post-test (`do_loop`) loops.
//!
//! Both thread the body's output into the next iteration and hand the
//! condition a zero-based evaluation index. The history passed to the body is
//! the one the loop itself received; iterations do not extend it. A stop or an
//! error from the body leaves the loop immediately and propagates outward.

use crate::core::control::Control;
use crate::core::history::History;
use crate::core::middleware::{boxed, Middleware};
use crate::error::PipeError;
use std::sync::Arc;
use tracing::{event, Level};

/// Checks `condition` before every run of `body`; the body may run zero times.
pub fn loop_while<D, I, H, P>(condition: P, body: Middleware<D, I, I, H>) -> Middleware<D, I, I, H>
where
  D: Send + Sync + 'static,
  I: Send + 'static,
  H: Send + Sync + 'static,
  P: Fn(&I, usize, &History<H>) -> bool + Send + Sync + 'static,
{
  let condition = Arc::new(condition);
  boxed(move |deps: Arc<D>, input: I, history: History<H>| {
    let condition = Arc::clone(&condition);
    let body = Arc::clone(&body);
    Box::pin(async move {
      let mut index = 0;
      let mut current = input;
      while condition(&current, index, &history) {
        index += 1;
        event!(Level::TRACE, iteration = index, "Running loop body.");
        match body(Arc::clone(&deps), current, history.clone()).await? {
          Control::Continue(next) => current = next,
          Control::Stop(signal) => return Ok(Control::Stop(signal)),
        }
      }
      Ok::<_, PipeError>(Control::Continue(current))
    })
  })
}

/// Runs `body` once, then again for as long as `condition` holds afterwards.
pub fn do_loop<D, I, H, P>(condition: P, body: Middleware<D, I, I, H>) -> Middleware<D, I, I, H>
where
  D: Send + Sync + 'static,
  I: Send + 'static,
  H: Send + Sync + 'static,
  P: Fn(&I, usize, &History<H>) -> bool + Send + Sync + 'static,
{
  let condition = Arc::new(condition);
  boxed(move |deps: Arc<D>, input: I, history: History<H>| {
    let condition = Arc::clone(&condition);
    let body = Arc::clone(&body);
    Box::pin(async move {
      let mut index = 0;
      let mut current = input;
      loop {
        event!(Level::TRACE, iteration = index + 1, "Running loop body.");
        match body(Arc::clone(&deps), current, history.clone()).await? {
          Control::Continue(next) => current = next,
          Control::Stop(signal) => return Ok(Control::Stop(signal)),
        }
        let again = condition(&current, index, &history);
        index += 1;
        if !again {
          break;
        }
      }
      Ok::<_, PipeError>(Control::Continue(current))
    })
  })
}
