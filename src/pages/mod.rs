//! Page assemblers.
//!
//! Each view is a stateless pipeline: one query, then a pure mapping into a
//! view value that the templates turn into HTML. "No posts" and "not found"
//! are view states, not errors.

pub mod detail;
pub mod index;
pub mod metadata;

pub use detail::{AuthorView, MainImage, PostPage, PostView};
pub use index::{IndexView, PostSummary};
pub use metadata::PageMetadata;
