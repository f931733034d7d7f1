//! HTTP Handlers

mod callout;
mod ping;
mod voice;

pub use callout::*;
pub use ping::*;
pub use voice::*;
