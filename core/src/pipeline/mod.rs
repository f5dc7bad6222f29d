// pipewright/src/pipeline/mod.rs

//! Defines the `Pipeline<D, V>` struct, its construction, and the sequential
//! executor that drives it.

pub mod definition;
pub mod execution;

pub use definition::{flow, Pipeline};
pub use execution::{pipe, pipe_as_middleware};
