// pipewright/src/pipeline/definition.rs

//! Contains the `Pipeline<D, V>` struct definition and methods for its
//! construction and structural modification.

use crate::core::middleware::Middleware;

/// An ordered list of middleware run strictly in sequence over a value of
/// type `V`, against a dependency bag of type `D`.
///
/// A pipeline owns no run state. Every call to `run` builds its own history
/// queue, so one pipeline can be run concurrently or embedded in itself.
pub struct Pipeline<D, V>
where
  D: Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  pub(crate) steps: Vec<Middleware<D, V>>,
}

impl<D, V> Pipeline<D, V>
where
  D: Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  pub fn new(steps: Vec<Middleware<D, V>>) -> Self {
    Self { steps }
  }

  /// Appends a middleware, builder style.
  pub fn then(mut self, middleware: Middleware<D, V>) -> Self {
    self.steps.push(middleware);
    self
  }

  pub fn push(&mut self, middleware: Middleware<D, V>) {
    self.steps.push(middleware);
  }

  /// Inserts a middleware at `index`. Panics if `index > len`, like `Vec::insert`.
  pub fn insert(&mut self, index: usize, middleware: Middleware<D, V>) {
    self.steps.insert(index, middleware);
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }
}

impl<D, V> Clone for Pipeline<D, V>
where
  D: Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  fn clone(&self) -> Self {
    Self {
      steps: self.steps.clone(),
    }
  }
}

impl<D, V> Default for Pipeline<D, V>
where
  D: Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new(Vec::new())
  }
}

// Middleware are opaque closures, so only the shape is printed.
impl<D, V> std::fmt::Debug for Pipeline<D, V>
where
  D: Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline")
      .field("num_steps", &self.steps.len())
      .field("value_type", &std::any::type_name::<V>())
      .finish()
  }
}

/// Packages `middlewares` as a reusable pipeline whose dependency bag is
/// supplied at each `run`.
pub fn flow<D, V>(middlewares: Vec<Middleware<D, V>>) -> Pipeline<D, V>
where
  D: Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  Pipeline::new(middlewares)
}
