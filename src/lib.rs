//! Decoder for the `.enn` network description format: line-oriented
//! `verb(arg,arg,...)` clauses describing a feed-forward network's topology,
//! link weights, node biases and training hyperparameters.
//!
//! Feed [`decode`] the file's lines and it returns a complete [`NetworkFile`]
//! or the first decode failure. The files contain no spaces inside argument
//! lists and should not need hand editing.

mod cursor;
mod decode;
mod error;
mod record;
mod topology;

pub use decode::decode;
pub use error::{FileErr, Result};
pub use record::NetworkFile;
pub use topology::NetworkTopology;
