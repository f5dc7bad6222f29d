// src/lib.rs

//! Pipewright: a functional composition engine for async middleware pipelines.
//!
//! Every unit of work is a [`Middleware`]: an async function of a shared
//! dependency bag, the current value, and the history of values the pipeline
//! has seen so far. On top of that one shape, pipewright provides:
//!  - A strictly sequential executor ([`Pipeline`], [`pipe`]) with a history queue.
//!  - Graceful early termination via [`Control::Stop`], absorbed by the nearest executor.
//!  - Conditional execution and branching ([`when`], [`if_else`]).
//!  - Pre-test and post-test loops ([`loop_while`], [`do_loop`]).
//!  - Recovery from failures and stops ([`try_catch`]).
//!  - Fan-out, overlapping ([`concurrency`]) or one at a time ([`merge`]).
//!  - Sub-pipeline embedding ([`pipe_as_middleware`], [`flow`]) and history lookup ([`ask`]).

pub mod combinators;
pub mod common;
pub mod core;
pub mod error;
pub mod pipeline;

// --- Re-exports for the Public API ---

pub use crate::core::control::{Control, PipelineResult, StopSignal};
pub use crate::core::history::{call_with_queue, History};
pub use crate::core::middleware::{
  as_middleware, bind, factory, from_step, map_output, middleware, Handler, Middleware, Step,
};
pub use crate::core::shared::Shared;

pub use crate::pipeline::{flow, pipe, pipe_as_middleware, Pipeline};

pub use crate::combinators::{ask, concurrency, do_loop, if_else, loop_while, merge, try_catch, when, Caught, Fault};

pub use crate::error::{PipeError, PipeResult};

/*
    Core Workflow:
    1. Pick a dependency bag type `D` (clients, config, `Shared<T>` state) and a value type `V`.
    2. Write middleware with `middleware(...)`, `as_middleware(...)`, a `Step` impl, or `common::*`.
    3. Compose them with the combinators; each combinator returns another middleware.
    4. Build a `Pipeline<D, V>` (or call `pipe`) and run it with `Arc<D>` and an initial value.
    5. A `Control::Stop` ends the run early and yields the value reached so far.
*/
