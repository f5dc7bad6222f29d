// pipewright/src/common.rs

//! Ready-made middleware for the most common one-liners: failing, stopping,
//! injecting a constant, side effects and plain transforms.

use crate::core::control::{Control, StopSignal};
use crate::core::history::History;
use crate::core::middleware::{boxed, Middleware};
use crate::error::{PipeError, PipeResult};
use std::future::Future;
use std::sync::Arc;

/// Text for `throw_error` / `stop`: fixed, or rendered from the step's
/// arguments when the middleware runs.
pub enum Message<I, H = I> {
  Text(String),
  Render(Arc<dyn Fn(&I, &History<H>) -> String + Send + Sync>),
}

impl<I, H> Message<I, H> {
  pub fn render(f: impl Fn(&I, &History<H>) -> String + Send + Sync + 'static) -> Self {
    Message::Render(Arc::new(f))
  }

  pub fn resolve(&self, input: &I, history: &History<H>) -> String {
    match self {
      Message::Text(text) => text.clone(),
      Message::Render(render) => render(input, history),
    }
  }
}

impl<I, H> From<&str> for Message<I, H> {
  fn from(text: &str) -> Self {
    Message::Text(text.to_string())
  }
}

impl<I, H> From<String> for Message<I, H> {
  fn from(text: String) -> Self {
    Message::Text(text)
  }
}

/// Always fails with `PipeError::Thrown`.
pub fn throw_error<D, I, O, H>(message: impl Into<Message<I, H>>) -> Middleware<D, I, O, H>
where
  D: Send + Sync + 'static,
  I: Send + 'static,
  O: Send + 'static,
  H: Send + Sync + 'static,
{
  let message = message.into();
  boxed(move |_deps: Arc<D>, input: I, history: History<H>| {
    let message = message.resolve(&input, &history);
    Box::pin(async move { Err(PipeError::Thrown { message }) })
  })
}

/// Always asks the enclosing pipeline to stop.
pub fn stop<D, I, O, H>(message: impl Into<Message<I, H>>) -> Middleware<D, I, O, H>
where
  D: Send + Sync + 'static,
  I: Send + 'static,
  O: Send + 'static,
  H: Send + Sync + 'static,
{
  let message = message.into();
  boxed(move |_deps: Arc<D>, input: I, history: History<H>| {
    let signal = StopSignal::new(message.resolve(&input, &history));
    Box::pin(async move { Ok(Control::Stop(signal)) })
  })
}

/// Ignores its input and yields a clone of `value`.
pub fn push_data<D, I, O, H>(value: O) -> Middleware<D, I, O, H>
where
  D: Send + Sync + 'static,
  I: Send + 'static,
  O: Clone + Send + Sync + 'static,
  H: Send + Sync + 'static,
{
  boxed(move |_deps: Arc<D>, _input: I, _history: History<H>| {
    let value = value.clone();
    Box::pin(async move { Ok(Control::Continue(value)) })
  })
}

/// Runs the side effect `f` and passes the input through unchanged. A failing
/// side effect fails the step.
pub fn tap<D, I, H, F, Fut>(f: F) -> Middleware<D, I, I, H>
where
  D: Send + Sync + 'static,
  I: Clone + Send + 'static,
  H: Send + Sync + 'static,
  F: Fn(I, History<H>) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = PipeResult<()>> + Send + 'static,
{
  boxed(move |_deps: Arc<D>, input: I, history: History<H>| {
    let effect = f(input.clone(), history);
    Box::pin(async move {
      effect.await?;
      Ok::<_, PipeError>(Control::Continue(input))
    })
  })
}

/// Async transform of the current value.
pub fn map<D, I, O, H, F, Fut>(f: F) -> Middleware<D, I, O, H>
where
  D: Send + Sync + 'static,
  I: Send + 'static,
  O: Send + 'static,
  H: Send + Sync + 'static,
  F: Fn(I, History<H>) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = PipeResult<O>> + Send + 'static,
{
  boxed(move |_deps: Arc<D>, input: I, history: History<H>| {
    let transform = f(input, history);
    Box::pin(async move { Ok::<_, PipeError>(Control::Continue(transform.await?)) })
  })
}
