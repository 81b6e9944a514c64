//! Dictionary source files and their in-memory indexes.
//!
//! `DictStore` owns the verbatim header, a `CodeTrie` for exact and prefix
//! search by code, and a `WordIndex` for exact search by word. The two
//! indexes are private to the store and always mutated together.

mod batch;
mod line;
mod load;
mod store;
#[cfg(test)]
mod tests;
mod trie;
mod word_index;

pub use batch::{BatchError, Edit};
pub use line::{is_valid_weight, Entry, Line, COMMENT_MARKER};
pub use store::{DictStore, LoadReport};
pub use trie::CodeTrie;
pub use word_index::WordIndex;

use std::io;

/// Line that closes the header block of a dictionary source.
pub const HEADER_END: &str = "...";

#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed source line; `line` is 1-based.
    #[error("malformed line {line}: {text}")]
    Format { line: usize, text: String },

    #[error("missing header (expected at least 2 lines ending with \"...\")")]
    MissingHeader,

    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    #[error("no path to save to")]
    NoPath,
}
