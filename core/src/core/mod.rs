pub mod control;
pub mod history;
pub mod middleware;
pub mod shared;

// Re-export key types for easier access from other pipewright modules (and lib.rs)
pub use control::{Control, PipelineResult, StopSignal};
pub use history::{call_with_queue, History};
pub use middleware::{as_middleware, bind, factory, from_step, map_output, middleware, Handler, Middleware, Step};
pub use shared::Shared;
