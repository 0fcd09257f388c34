//! Query Range Splitting
//!
//! Breaks long query ranges into chunks a backend can answer one at a time:
//!
//! - **Chunker**: step-aligned metric chunks and contiguous log chunks
//! - **Parse**: duration and timestamp text for CLI and API input
//! - **Types**: `Chunk` and `TimeRange`
//!
//! # Example
//!
//! ```rust
//! use querysplit::split::RangeChunker;
//!
//! let chunker = RangeChunker::default();
//!
//! // 60s of data sampled every 10s, at most 25s per chunk
//! let chunks = chunker.chunk(3_000, 63_000, 10_000, 25_000).unwrap();
//! assert_eq!(chunks.len(), 3);
//! assert_eq!((chunks[0].start, chunks[0].end), (0, 10_000));
//!
//! // chunk size below the step cannot be satisfied
//! assert!(chunker.chunk(3_000, 63_000, 10_000, 1_000).is_none());
//! ```

mod chunker;
mod error;
mod parse;
mod types;

pub use chunker::{range_chunks, RangeChunker, DEFAULT_MAX_CHUNK_COUNT};
pub use error::{SplitError, SplitResult};
pub use parse::{parse_duration, parse_timestamp, parse_timestamp_at};
pub use types::{Chunk, TimeRange};
