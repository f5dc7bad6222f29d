// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use pipewright::{as_middleware, middleware, Control, History, Middleware, PipeError, Shared};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Dependency Bag ---
#[derive(Debug, Default)]
pub struct TestDeps {
  pub calls: AtomicUsize,
  pub log: Shared<Vec<String>>,
}

impl TestDeps {
  pub fn shared() -> Arc<TestDeps> {
    Arc::new(TestDeps::default())
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  pub fn log(&self) -> Vec<String> {
    self.log.snapshot()
  }
}

/// Middleware over `i64` values with an `i64` history, the shape most tests use.
pub type Mw<O = i64> = Middleware<TestDeps, i64, O, i64>;

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Test middleware failed: {0}")]
  Boom(String),
}

// --- Common Middleware Creators ---
pub fn add(n: i64) -> Mw {
  as_middleware(move |value: i64, _history: &History<i64>| value + n)
}

pub fn double() -> Mw {
  as_middleware(|value: i64, _history: &History<i64>| value * 2)
}

pub fn identity() -> Mw {
  as_middleware(|value: i64, _history: &History<i64>| value)
}

/// Adds `n`, bumps the call counter and logs `label`.
pub fn counted(label: &'static str, n: i64) -> Mw {
  middleware(move |deps: Arc<TestDeps>, value: i64, _history: History<i64>| async move {
    deps.calls.fetch_add(1, Ordering::SeqCst);
    deps.log.write().push(label.to_string());
    Ok(Control::Continue(value + n))
  })
}

/// Logs `label`, then fails with `TestError::Boom(message)`.
pub fn failing(label: &'static str, message: &'static str) -> Mw {
  middleware(move |deps: Arc<TestDeps>, _value: i64, _history: History<i64>| async move {
    deps.calls.fetch_add(1, Ordering::SeqCst);
    deps.log.write().push(label.to_string());
    tracing::warn!(target: "test_middleware", step = label, "failing with: '{}'", message);
    Err(PipeError::from(anyhow::Error::new(TestError::Boom(message.to_string()))))
  })
}

/// Logs `label`, then asks the pipeline to stop with `message`.
pub fn stopping(label: &'static str, message: &'static str) -> Mw {
  middleware(move |deps: Arc<TestDeps>, _value: i64, _history: History<i64>| async move {
    deps.calls.fetch_add(1, Ordering::SeqCst);
    deps.log.write().push(label.to_string());
    Ok(Control::stop(message))
  })
}

/// Logs the history it was handed as `label:[a,b,c]` and passes the value on.
pub fn record_history(label: &'static str) -> Mw {
  middleware(move |deps: Arc<TestDeps>, value: i64, history: History<i64>| async move {
    let rendered = history.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",");
    deps.log.write().push(format!("{}:[{}]", label, rendered));
    Ok(Control::Continue(value))
  })
}

pub fn boom_message(err: &PipeError) -> Option<String> {
  match err.downcast_ref::<TestError>() {
    Some(TestError::Boom(msg)) => Some(msg.clone()),
    None => None,
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
