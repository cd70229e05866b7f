use chunkbuf::{ChunkBuf, ChunkBufError};

/// Destination of rendered bytes.
///
/// Only `write_bytes` is required; the rest are conveniences over it.
pub trait Output {
    /// # Errors
    ///
    /// Returns `ChunkBufError::OutOfMemory` if the destination cannot grow.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ChunkBufError>;

    /// # Errors
    ///
    /// See `write_bytes`.
    fn write_str(&mut self, text: &str) -> Result<(), ChunkBufError> {
        self.write_bytes(text.as_bytes())
    }

    /// # Errors
    ///
    /// See `write_bytes`.
    fn write_char(&mut self, c: char) -> Result<(), ChunkBufError> {
        let mut encoded = [0u8; 4];
        self.write_bytes(c.encode_utf8(&mut encoded).as_bytes())
    }

    /// Writes `c` `count` times.
    ///
    /// # Errors
    ///
    /// See `write_bytes`.
    fn write_repeated(&mut self, c: char, count: usize) -> Result<(), ChunkBufError> {
        let mut encoded = [0u8; 4];
        let encoded = c.encode_utf8(&mut encoded).as_bytes();
        if let &[byte] = encoded {
            let block = [byte; 32];
            let mut left = count;
            while left > 0 {
                let n = left.min(block.len());
                self.write_bytes(&block[..n])?;
                left -= n;
            }
            return Ok(());
        }
        for _ in 0..count {
            self.write_bytes(encoded)?;
        }
        Ok(())
    }
}

impl<const N: usize> Output for ChunkBuf<N> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ChunkBufError> {
        self.append_bytes(bytes)
    }

    fn write_char(&mut self, c: char) -> Result<(), ChunkBufError> {
        self.append_code_point(c)
    }
}

/// Counts bytes instead of storing them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthCounter {
    len: usize,
}

impl LengthCounter {
    #[must_use]
    pub fn new() -> Self {
        LengthCounter::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Output for LengthCounter {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ChunkBufError> {
        self.len += bytes.len();
        Ok(())
    }

    fn write_repeated(&mut self, c: char, count: usize) -> Result<(), ChunkBufError> {
        self.len += c.len_utf8() * count;
        Ok(())
    }
}
