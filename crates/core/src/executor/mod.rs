//! Chain execution.
//!
//! The [`AttemptExecutor`] runs an ordered chain of handlers over a
//! working file set, one hop at a time. Consecutive candidate chains from
//! the searcher often share a long prefix; the executor keeps the files
//! produced after each completed hop in a forward prefix cache so a
//! re-attempt resumes from the deepest shared position instead of
//! recomputing the whole prefix.

mod attempt;
mod error;
mod prefix_cache;

pub use attempt::AttemptExecutor;
pub use error::AttemptError;
