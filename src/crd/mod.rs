//! Custom Resource Definitions (CRDs) for markdown-view.
//!
//! - `MarkdownView`: a set of markdown documents served by an mdBook viewer

mod markdown_view;

pub use markdown_view::*;
