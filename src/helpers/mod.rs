//! Formatting helpers shared by the renderer, generator and CLI

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
