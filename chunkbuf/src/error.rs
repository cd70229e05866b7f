use thiserror::Error;

/// Error types for `ChunkBuf` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ChunkBufError {
    /// A new chunk could not be allocated
    #[error("Out of memory: failed to allocate a chunk of {requested} bytes")]
    OutOfMemory {
        /// Size of the chunk that was requested
        requested: usize,
    },
    /// The sink the buffer was drained into reported an error
    #[error("Sink error: {kind:?}")]
    Sink {
        /// Kind reported by the sink
        kind: embedded_io::ErrorKind,
    },
}

impl embedded_io::Error for ChunkBufError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            ChunkBufError::OutOfMemory { .. } => embedded_io::ErrorKind::OutOfMemory,
            ChunkBufError::Sink { kind } => *kind,
        }
    }
}
