#![no_std]

//! `ChunkBuf`: an append-only byte buffer built from fixed-size chunks.
//!
//! The first chunk is stored inline in the buffer value itself, so short outputs
//! never touch the heap. When a chunk fills up, the next one is allocated and
//! linked after it. Written bytes are never moved or copied backward, which keeps
//! appends O(1) amortized even for very large outputs.
//!
//! # Operations
//!
//! - `append_bytes()`, `append_str()`, `append_code_point()`: write at the end,
//!   splitting across chunk boundaries; at most one allocation per overflow
//! - `traverse()`, `chunks()`: visit the chunks in order without copying
//! - `combine()`: copy everything into one `Vec<u8>` sized up front
//! - `drain_into()`: write every chunk into an `embedded_io::Write` sink
//! - `reset()`: empty the buffer, keep the chunks for reuse
//! - `release()`: empty the buffer, free every heap chunk
//!
//! Allocation failures are reported as `ChunkBufError::OutOfMemory` instead of
//! aborting.
//!
//! ```
//! # use chunkbuf::ChunkBuf;
//! let mut buf: ChunkBuf<8> = ChunkBuf::new();
//! buf.append_str("Hello, ").unwrap();
//! buf.append_str("world!").unwrap();
//! buf.append_code_point('✓').unwrap();
//!
//! assert_eq!(buf.indirection_count(), 1);
//! let chunks: Vec<&[u8]> = buf.chunks().collect();
//! assert_eq!(chunks[0], b"Hello, w");
//! assert_eq!(buf.combine().unwrap(), "Hello, world!✓".as_bytes());
//! ```
//!
//! ## `no_std` Compatibility
//!
//! The crate only needs `core` and `alloc`. Enable the optional `std` feature to
//! get `std::error::Error` for the error type:
//! ```toml
//! [dependencies]
//! chunkbuf = { version = "0.1", features = ["std"] }
//! ```

extern crate alloc;

mod core;
mod error;
mod iter;

pub use crate::core::{ChunkBuf, DEFAULT_CHUNK_CAPACITY};
pub use error::ChunkBufError;
pub use iter::Chunks;
