// pipewright/src/core/history.rs

//! The history queue a pipeline accumulates, and the helpers that turn it into
//! the arguments a middleware receives.

use crate::core::control::Control;
use crate::core::middleware::Middleware;
use crate::error::PipeResult;
use futures::future::BoxFuture;
use std::ops::Index;
use std::sync::Arc;

/// Immutable snapshot of a pipeline's history queue as seen by one step.
///
/// Entry 0 is the pipeline's initial value. A step sees every value that was
/// current when a step began, up to and including its own input, so the last
/// entry is the value the step was handed.
///
/// Cloning is a pointer copy.
#[derive(Debug)]
pub struct History<H>(Arc<[H]>);

impl<H> History<H> {
  pub fn empty() -> Self {
    History(Arc::from(Vec::new()))
  }

  pub fn get(&self, index: usize) -> Option<&H> {
    self.0.get(index)
  }

  pub fn last(&self) -> Option<&H> {
    self.0.last()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, H> {
    self.0.iter()
  }

  pub fn as_slice(&self) -> &[H] {
    &self.0
  }
}

impl<H: Clone> History<H> {
  /// Takes a snapshot of the executor's live queue.
  pub fn from_queue(queue: &[H]) -> Self {
    History(Arc::from(queue))
  }
}

impl<H> Clone for History<H> {
  fn clone(&self) -> Self {
    History(Arc::clone(&self.0))
  }
}

impl<H> Default for History<H> {
  fn default() -> Self {
    Self::empty()
  }
}

impl<H> From<Vec<H>> for History<H> {
  fn from(values: Vec<H>) -> Self {
    History(Arc::from(values))
  }
}

impl<H> Index<usize> for History<H> {
  type Output = H;

  fn index(&self, index: usize) -> &H {
    &self.0[index]
  }
}

impl<'a, H> IntoIterator for &'a History<H> {
  type Item = &'a H;
  type IntoIter = std::slice::Iter<'a, H>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

/// Invokes `middleware` with `input`, presenting `queue` as its history.
pub fn call_with_queue<D, I, O, H>(
  middleware: &Middleware<D, I, O, H>,
  deps: Arc<D>,
  input: I,
  queue: &[H],
) -> BoxFuture<'static, PipeResult<Control<O>>>
where
  H: Clone,
{
  middleware(deps, input, History::from_queue(queue))
}
