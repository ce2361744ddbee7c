//! Content module - typed views of the documents fetched from the CMS

mod block;
mod post;

pub use block::{CodeBlock, ContentBlock, MarkDef, Span, TextBlock};
pub use post::{parse_datetime, AssetPointer, Author, Category, Crop, ImageRef, Post, PostStatus, Seo};
