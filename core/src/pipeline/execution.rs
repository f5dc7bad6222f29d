// pipewright/src/pipeline/execution.rs

//! Contains `Pipeline::run()`, the sequential executor, and the entry points
//! built on it (`pipe`, `pipe_as_middleware`).

use crate::core::control::{Control, PipelineResult};
use crate::core::history::History;
use crate::core::middleware::{boxed, factory, Middleware};
use crate::error::{PipeError, PipeResult};
use crate::pipeline::definition::Pipeline;
use std::sync::Arc;
use tracing::{event, instrument, span, Instrument, Level};

impl<D, V> Pipeline<D, V>
where
  D: Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  /// Runs every middleware in order against `deps`, starting from `input`.
  ///
  /// Before each step the running value is appended to the history queue, so
  /// step `k` (0-based) sees `k + 1` history entries ending with its own input.
  /// Step `k + 1` never starts before step `k` has produced its value.
  ///
  /// A `Control::Stop` ends the run with `PipelineResult::Stopped`, holding the
  /// value the stopping step was given. Any error aborts the run and is
  /// returned unchanged.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      deps_type = %std::any::type_name::<D>(),
      value_type = %std::any::type_name::<V>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run_with_status(&self, deps: Arc<D>, input: V) -> PipeResult<PipelineResult<V>> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    let bind_to_deps = factory::<D, V, V, V>(deps);
    let mut queue: Vec<V> = Vec::with_capacity(self.steps.len());
    let mut current = input;

    for (step_idx, middleware) in self.steps.iter().enumerate() {
      let step_span = span!(Level::DEBUG, "pipeline_step_execution", step_index = step_idx);

      queue.push(current.clone());
      let handler = bind_to_deps(middleware);
      let outcome = handler(current.clone(), &queue).instrument(step_span).await;

      match outcome {
        Ok(Control::Continue(next)) => current = next,
        Ok(Control::Stop(signal)) => {
          event!(Level::INFO, step_index = step_idx, message = %signal, "Pipeline stopped by a middleware.");
          return Ok(PipelineResult::Stopped { value: current, signal });
        }
        Err(e) => {
          event!(Level::ERROR, step_index = step_idx, error = %e, "Middleware failed.");
          return Err(e);
        }
      }
    }

    event!(Level::DEBUG, "Pipeline execution completed successfully.");
    Ok(PipelineResult::Completed(current))
  }

  /// Like [`run_with_status`](Self::run_with_status), but a stopped run is
  /// reported as a plain success carrying the pre-stop value.
  pub async fn run(&self, deps: Arc<D>, input: V) -> PipeResult<V> {
    Ok(self.run_with_status(deps, input).await?.into_value())
  }

  /// Wraps the whole pipeline as one middleware.
  ///
  /// The enclosing history is ignored; each invocation runs with a fresh
  /// queue. A stop inside ends only this inner run and surfaces as
  /// `Control::Continue` with the value reached.
  pub fn into_middleware<H>(self) -> Middleware<D, V, V, H>
  where
    H: Send + Sync + 'static,
  {
    let pipeline = Arc::new(self);
    boxed(move |deps: Arc<D>, input: V, _history: History<H>| {
      let pipeline = Arc::clone(&pipeline);
      Box::pin(async move { Ok::<_, PipeError>(Control::Continue(pipeline.run(deps, input).await?)) })
    })
  }
}

/// Runs `middlewares` once, in order, against `deps` starting from `input`.
pub async fn pipe<D, V>(deps: Arc<D>, input: V, middlewares: Vec<Middleware<D, V>>) -> PipeResult<V>
where
  D: Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  Pipeline::new(middlewares).run(deps, input).await
}

/// Embeds `middlewares` as a single middleware; see [`Pipeline::into_middleware`].
pub fn pipe_as_middleware<D, V, H>(middlewares: Vec<Middleware<D, V>>) -> Middleware<D, V, V, H>
where
  D: Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
  H: Send + Sync + 'static,
{
  Pipeline::new(middlewares).into_middleware()
}
