//! Format handler capability.
//!
//! A handler is a codec backend (an image codec suite, a video muxer, a
//! vector rasteriser, a renamer) that declares which formats it can read
//! from and write to and converts file sets between them. The routing
//! engine never inspects media payloads itself; everything it knows about
//! a backend comes through the [`Handler`] trait.

mod error;
mod traits;
mod types;

pub use error::HandlerError;
pub use traits::Handler;
pub use types::{FileData, Format};
