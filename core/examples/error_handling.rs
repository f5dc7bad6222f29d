// pipewright/examples/error_handling.rs

use pipewright::{
  as_middleware, middleware, try_catch, Caught, Control, Fault, History, PipeError, PipeResult, Pipeline,
};
use std::sync::Arc;
use tracing::{error, info};

// 1. Define a custom application error type
#[derive(Debug, thiserror::Error)]
enum ExampleAppError {
  #[error("A custom application error occurred: {0}")]
  CustomError(String),
}

fn fetch_quote(symbol: &str) -> anyhow::Result<f64> {
  match symbol {
    "ACME" => Ok(12.5),
    other => Err(ExampleAppError::CustomError(format!("no quote for {}", other)).into()),
  }
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  // Scenario 1: a step fails and the error reaches the caller
  info!("\nScenario 1: a step returns a custom error");
  match quote_pipeline().run(Arc::new(()), "WIDGET".to_string()).await {
    Ok(value) => info!("Unexpected success: {}", value),
    Err(err) => {
      error!("Pipeline failed: {}", err);
      if let Some(app_err) = err.downcast_ref::<ExampleAppError>() {
        info!("Recovered the typed error: {:?}", app_err);
      }
    }
  }

  // Scenario 2: the same step wrapped in try_catch falls back to a default
  info!("\nScenario 2: try_catch recovers from the failure");
  let guarded = Pipeline::new(vec![try_catch(lookup(), fallback())]);
  match guarded.run(Arc::new(()), "WIDGET".to_string()).await {
    Ok(value) => info!("Recovered with: {}", value),
    Err(err) => error!("Still failed: {}", err),
  }
}

fn lookup() -> pipewright::Middleware<(), String> {
  middleware(|_deps: Arc<()>, symbol: String, _history: History<String>| async move {
    let price = fetch_quote(&symbol)?;
    Ok::<_, PipeError>(Control::Continue(format!("{}={}", symbol, price)))
  })
}

fn fallback() -> pipewright::Middleware<(), Caught<String>, String, String> {
  middleware(|_deps: Arc<()>, caught: Caught<String>, _history: History<String>| async move {
    match caught.fault {
      Fault::Failed(err) => {
        info!("Falling back after: {}", err);
        PipeResult::Ok(Control::Continue(format!("{}=unknown", caught.input)))
      }
      fault @ Fault::Stopped(_) => fault.into_control(),
    }
  })
}

fn quote_pipeline() -> Pipeline<(), String> {
  Pipeline::new(vec![
    as_middleware(|symbol: String, _history: &History<String>| symbol.trim().to_uppercase()),
    lookup(),
  ])
}
