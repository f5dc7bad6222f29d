// pipewright/examples/pipeline_stop.rs

use pipewright::{
  as_middleware, common, if_else, middleware, pipe_as_middleware, Control, History, PipeError, Pipeline,
  PipelineResult,
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), PipeError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Pipeline Stop Example ---");

  let validate = if_else(
    |order_total: &u32, _history: &History<u32>| *order_total == 0,
    common::stop("empty order, nothing to charge"),
    as_middleware(|order_total: u32, _history: &History<u32>| order_total),
  );

  let charge = middleware(|_deps: Arc<()>, order_total: u32, _history: History<u32>| async move {
    info!("Charging {}", order_total);
    Ok(Control::Continue(order_total + 5))
  });

  let pipeline = Pipeline::new(vec![validate, charge]);

  for total in [0u32, 40] {
    match pipeline.run_with_status(Arc::new(()), total).await? {
      PipelineResult::Completed(value) => info!("Order {} completed, charged {}", total, value),
      PipelineResult::Stopped { value, signal } => warn!("Order {} stopped early ({}), value kept at {}", total, signal, value),
    }
  }

  // A stop inside an embedded pipeline ends only that pipeline; the outer one carries on.
  let inner = pipe_as_middleware(vec![
    as_middleware(|n: u32, _history: &History<u32>| n + 1),
    common::stop("inner pipeline is done"),
    as_middleware(|n: u32, _history: &History<u32>| n * 1000),
  ]);
  let outer = Pipeline::new(vec![inner, as_middleware(|n: u32, _history: &History<u32>| n * 2)]);
  let value = outer.run(Arc::new(()), 1).await?;
  info!("Outer pipeline finished with {}", value);
  assert_eq!(value, 4);

  Ok(())
}
