//! Helper functions for templates and assemblers

mod date;
mod url;

pub use date::*;
pub use url::*;
