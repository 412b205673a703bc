//! Source processing pipeline.
//!
//! A source goes through four stages:
//! - Tokenize into a lossless stream (whitespace, line breaks and comments kept)
//! - Parse the significant tokens into a syntax tree and assign indent levels
//! - Visit the tree in post-order and let each node formatter edit the stream
//! - Serialize the edited stream
//!
//! The entry points are [`format_source`] for in-memory text and
//! [`format_file`], which reads any `BufRead` and writes to any `Write`.

pub mod pipeline;

pub use pipeline::{format_file, format_source};
