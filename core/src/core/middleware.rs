// pipewright/src/core/middleware.rs

//! Defines the `Middleware` shape every pipeline unit satisfies, the `Handler`
//! form the executor drives, and the constructors that produce middleware from
//! closures and structs.

use crate::core::control::Control;
use crate::core::history::History;
use crate::error::{PipeError, PipeResult};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

// --- Middleware Definition ---

/// Type alias for a pipeline middleware.
///
/// A middleware is an asynchronous function of the dependency bag `D`, the
/// current value `I` and the history snapshot (`History<H>`), producing a
/// `Control<O>`: either the next value or a stop request.
///
/// Middleware are stateless from the engine's point of view and cheap to clone,
/// so combinators can capture and reuse them freely.
pub type Middleware<D, I, O = I, H = I> =
  Arc<dyn Fn(Arc<D>, I, History<H>) -> BoxFuture<'static, PipeResult<Control<O>>> + Send + Sync>;

/// A middleware with its dependency bag already bound.
///
/// Takes the current value and the executor's live queue rather than a
/// snapshot. Exists only for the duration of one pipeline run.
pub type Handler<I, O = I, H = I> =
  Box<dyn Fn(I, &[H]) -> BoxFuture<'static, PipeResult<Control<O>>> + Send + Sync>;

/// Coerces a closure that already returns a boxed future into a `Middleware`.
pub(crate) fn boxed<D, I, O, H, F>(f: F) -> Middleware<D, I, O, H>
where
  F: Fn(Arc<D>, I, History<H>) -> BoxFuture<'static, PipeResult<Control<O>>> + Send + Sync + 'static,
{
  Arc::new(f)
}

/// Builds a middleware from an async closure.
///
/// ```ignore
/// let double = middleware(|_deps: Arc<()>, n: i64, _history: History<i64>| async move {
///   Ok(Control::Continue(n * 2))
/// });
/// ```
pub fn middleware<D, I, O, H, F, Fut>(f: F) -> Middleware<D, I, O, H>
where
  D: Send + Sync + 'static,
  I: Send + 'static,
  O: Send + 'static,
  H: Send + Sync + 'static,
  F: Fn(Arc<D>, I, History<H>) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = PipeResult<Control<O>>> + Send + 'static,
{
  boxed(move |deps: Arc<D>, input: I, history: History<H>| Box::pin(f(deps, input, history)))
}

/// Lifts a plain synchronous function into a middleware that ignores the
/// dependency bag and always continues.
pub fn as_middleware<D, I, O, H, F>(f: F) -> Middleware<D, I, O, H>
where
  D: Send + Sync + 'static,
  I: Send + 'static,
  O: Send + 'static,
  H: Send + Sync + 'static,
  F: Fn(I, &History<H>) -> O + Send + Sync + 'static,
{
  boxed(move |_deps: Arc<D>, input: I, history: History<H>| {
    let output = f(input, &history);
    Box::pin(async move { Ok(Control::Continue(output)) })
  })
}

/// Adapts the output of `inner` with `f`. Stop requests and errors pass through.
pub fn map_output<D, I, O, P, H, F>(inner: Middleware<D, I, O, H>, f: F) -> Middleware<D, I, P, H>
where
  D: Send + Sync + 'static,
  I: Send + 'static,
  O: Send + 'static,
  P: Send + 'static,
  H: Send + Sync + 'static,
  F: Fn(O) -> P + Send + Sync + 'static,
{
  let f = Arc::new(f);
  boxed(move |deps: Arc<D>, input: I, history: History<H>| {
    let fut = inner(deps, input, history);
    let f = Arc::clone(&f);
    Box::pin(async move { Ok::<_, PipeError>(fut.await?.map(|out| f(out))) })
  })
}

// --- Struct-based middleware ---

/// A middleware written as a type rather than a closure.
///
/// Useful when a step carries configuration of its own. Convert with
/// [`from_step`].
#[async_trait]
pub trait Step<D, I, O = I, H = I>: Send + Sync + 'static
where
  D: Send + Sync + 'static,
  I: Send + 'static,
  O: Send + 'static,
  H: Send + Sync + 'static,
{
  async fn call(&self, deps: Arc<D>, input: I, history: History<H>) -> PipeResult<Control<O>>;
}

pub fn from_step<D, I, O, H, S>(step: S) -> Middleware<D, I, O, H>
where
  D: Send + Sync + 'static,
  I: Send + 'static,
  O: Send + 'static,
  H: Send + Sync + 'static,
  S: Step<D, I, O, H>,
{
  let step = Arc::new(step);
  boxed(move |deps: Arc<D>, input: I, history: History<H>| {
    let step = Arc::clone(&step);
    Box::pin(async move { step.call(deps, input, history).await })
  })
}

// --- Dependency binding ---

/// Binds `deps` to `middleware`, producing the two-argument `Handler` the
/// executor operates on. The live queue is snapshotted into a `History` at
/// each call.
pub fn bind<D, I, O, H>(deps: Arc<D>, middleware: Middleware<D, I, O, H>) -> Handler<I, O, H>
where
  D: Send + Sync + 'static,
  I: 'static,
  O: 'static,
  H: Clone + Send + Sync + 'static,
{
  Box::new(move |input: I, queue: &[H]| middleware(Arc::clone(&deps), input, History::from_queue(queue)))
}

/// Returns a factory that binds the same `deps` to any middleware it is given.
pub fn factory<D, I, O, H>(deps: Arc<D>) -> impl Fn(&Middleware<D, I, O, H>) -> Handler<I, O, H>
where
  D: Send + Sync + 'static,
  I: 'static,
  O: 'static,
  H: Clone + Send + Sync + 'static,
{
  move |middleware: &Middleware<D, I, O, H>| bind(Arc::clone(&deps), Arc::clone(middleware))
}
