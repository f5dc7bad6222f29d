// pipewright/src/combinators/mod.rs

//! Control-flow combinators: higher-order middleware built purely from other
//! middleware.
//!
//! Each combinator takes middleware and returns a middleware of the same
//! shape, so they nest freely and can be placed anywhere a plain step can.

pub mod conditional;
pub mod fanout;
pub mod lookup;
pub mod looping;
pub mod recovery;

pub use conditional::{if_else, when};
pub use fanout::{concurrency, merge};
pub use lookup::ask;
pub use looping::{do_loop, loop_while};
pub use recovery::{try_catch, Caught, Fault};
