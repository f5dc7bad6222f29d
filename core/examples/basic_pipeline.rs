// pipewright/examples/basic_pipeline.rs

use pipewright::{as_middleware, ask, map_output, middleware, Control, History, PipeError, Pipeline, Shared};
use std::sync::Arc;
use tracing::info;

// 1. Define the dependency bag shared by every step
#[derive(Debug, Default)]
struct BasicDeps {
  message_log: Shared<Vec<String>>,
}

#[tokio::main]
async fn main() -> Result<(), PipeError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Pipeline Example ---");

  // 2. Build the steps. Each receives the current value and the history so far.
  let alpha = middleware(|deps: Arc<BasicDeps>, counter: i32, _history: History<i32>| async move {
    let next = counter + 1;
    let msg = format!("Alpha executed: counter = {}", next);
    info!("{}", msg);
    deps.message_log.write().push(msg);
    Ok(Control::Continue(next))
  });

  let beta = as_middleware(|counter: i32, _history: &History<i32>| counter * 2);

  // `ask` reads a value the pipeline saw earlier; index 0 is the original input.
  let gamma = map_output(ask::<BasicDeps, i32, i32>(0), |initial: Option<i32>| initial.unwrap_or_default() * 100);

  let pipeline = Pipeline::new(vec![alpha, beta]).then(gamma);

  // 3. Run it
  info!("Starting pipeline execution...");
  let deps = Arc::new(BasicDeps::default());
  let result = pipeline.run(deps.clone(), 5).await?;

  // 4. Inspect the results
  info!("Pipeline finished with value {}", result);
  for line in deps.message_log.read().iter() {
    info!("  log: {}", line);
  }
  assert_eq!(result, 500);

  Ok(())
}
