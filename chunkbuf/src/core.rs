use alloc::vec::Vec;

use crate::error::ChunkBufError;
use crate::iter::Chunks;

/// Capacity of every chunk when no explicit capacity is chosen.
pub const DEFAULT_CHUNK_CAPACITY: usize = 1024;

/// Position of a heap chunk inside the buffer's chunk arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChunkHandle(usize);

/// Where the write cursor currently points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChunkSlot {
    Inline,
    Heap(ChunkHandle),
}

#[derive(Debug, Clone)]
pub(crate) struct HeapChunk {
    pub(crate) data: Vec<u8>,
    pub(crate) occupied: usize,
    pub(crate) next: Option<ChunkHandle>,
}

/// An append-only byte buffer made of fixed-size chunks.
///
/// The first chunk lives inline in the struct; every further chunk is heap allocated
/// on demand and owned by the buffer. Bytes are never moved once written, so the
/// buffer can grow to any size without reallocating what is already there.
#[derive(Debug, Clone)]
pub struct ChunkBuf<const N: usize = DEFAULT_CHUNK_CAPACITY> {
    inline: [u8; N],
    inline_occupied: usize,
    inline_next: Option<ChunkHandle>,
    heap: Vec<HeapChunk>,
    cursor: ChunkSlot,
    chunks_in_use: usize,
    len: usize,
}

impl<const N: usize> ChunkBuf<N> {
    const NON_ZERO_CAPACITY: () = assert!(N > 0, "chunk capacity must be non-zero");

    /// Creates an empty buffer: one inline chunk, nothing occupied.
    #[must_use]
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_ZERO_CAPACITY;
        Self {
            inline: [0; N],
            inline_occupied: 0,
            inline_next: None,
            heap: Vec::new(),
            cursor: ChunkSlot::Inline,
            chunks_in_use: 1,
            len: 0,
        }
    }

    /// Capacity of a single chunk
    #[must_use]
    pub const fn chunk_capacity(&self) -> usize {
        N
    }

    /// Total number of bytes written since the last `reset` or `release`
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of chunks allocated beyond the inline one.
    ///
    /// Chunks kept alive by `reset` are counted too.
    #[must_use]
    pub fn indirection_count(&self) -> usize {
        self.heap.len()
    }

    /// Number of bytes the buffer can hold without allocating
    #[must_use]
    pub fn capacity(&self) -> usize {
        (self.indirection_count() + 1) * N
    }

    /// Appends `data`, splitting it across chunk boundaries.
    ///
    /// The largest possible prefix goes into the current chunk; only when bytes
    /// remain is exactly one further chunk taken (recycled after a `reset`, or
    /// freshly allocated), and so on until everything is written.
    ///
    /// # Errors
    ///
    /// Returns `ChunkBufError::OutOfMemory` if a new chunk cannot be allocated.
    /// Bytes that fitted before the failure stay in the buffer.
    pub fn append_bytes(&mut self, mut data: &[u8]) -> Result<(), ChunkBufError> {
        loop {
            let written = self.write_current(data);
            self.len += written;
            data = &data[written..];
            if data.is_empty() {
                return Ok(());
            }
            self.advance()?;
        }
    }

    /// Appends the UTF-8 bytes of `text`.
    ///
    /// # Errors
    ///
    /// Returns `ChunkBufError::OutOfMemory` if a new chunk cannot be allocated.
    pub fn append_str(&mut self, text: &str) -> Result<(), ChunkBufError> {
        self.append_bytes(text.as_bytes())
    }

    /// Appends the 1 to 4 byte UTF-8 encoding of `cp`.
    ///
    /// # Errors
    ///
    /// Returns `ChunkBufError::OutOfMemory` if a new chunk cannot be allocated.
    pub fn append_code_point(&mut self, cp: char) -> Result<(), ChunkBufError> {
        let mut encoded = [0u8; 4];
        self.append_bytes(cp.encode_utf8(&mut encoded).as_bytes())
    }

    /// Calls `visit` once per chunk in use, in order, with its occupied bytes.
    pub fn traverse<F: FnMut(&[u8])>(&self, mut visit: F) {
        for chunk in self.chunks() {
            visit(chunk);
        }
    }

    /// Iterates over the occupied part of every chunk in use.
    #[must_use]
    pub fn chunks(&self) -> Chunks<'_, N> {
        Chunks::new(self, self.chunks_in_use)
    }

    /// Copies all bytes into one contiguous vector.
    ///
    /// The vector is reserved for the whole chunk capacity up front so the copy
    /// never reallocates.
    ///
    /// # Errors
    ///
    /// Returns `ChunkBufError::OutOfMemory` if the vector cannot be allocated.
    pub fn combine(&self) -> Result<Vec<u8>, ChunkBufError> {
        let requested = self.capacity();
        let mut combined = Vec::new();
        combined
            .try_reserve_exact(requested)
            .map_err(|_| ChunkBufError::OutOfMemory { requested })?;
        self.traverse(|chunk| combined.extend_from_slice(chunk));
        Ok(combined)
    }

    /// Writes every chunk into `writer`, then flushes it.
    ///
    /// # Errors
    ///
    /// Returns `ChunkBufError::Sink` with the kind reported by the writer.
    pub fn drain_into<W: embedded_io::Write>(&self, writer: &mut W) -> Result<(), ChunkBufError> {
        use embedded_io::Error as _;

        for chunk in self.chunks() {
            writer
                .write_all(chunk)
                .map_err(|e| ChunkBufError::Sink { kind: e.kind() })?;
        }
        writer
            .flush()
            .map_err(|e| ChunkBufError::Sink { kind: e.kind() })
    }

    /// Empties the buffer but keeps every allocated chunk for reuse.
    pub fn reset(&mut self) {
        self.inline_occupied = 0;
        for chunk in &mut self.heap {
            chunk.occupied = 0;
        }
        self.cursor = ChunkSlot::Inline;
        self.chunks_in_use = 1;
        self.len = 0;
    }

    /// Empties the buffer and frees every heap chunk.
    pub fn release(&mut self) {
        log::debug!("releasing {} heap chunks", self.heap.len());
        self.heap = Vec::new();
        self.inline_occupied = 0;
        self.inline_next = None;
        self.cursor = ChunkSlot::Inline;
        self.chunks_in_use = 1;
        self.len = 0;
    }

    pub(crate) fn slot_bytes(&self, slot: ChunkSlot) -> &[u8] {
        match slot {
            ChunkSlot::Inline => &self.inline[..self.inline_occupied],
            ChunkSlot::Heap(handle) => {
                let chunk = &self.heap[handle.0];
                &chunk.data[..chunk.occupied]
            }
        }
    }

    pub(crate) fn next_slot(&self, slot: ChunkSlot) -> Option<ChunkSlot> {
        let next = match slot {
            ChunkSlot::Inline => self.inline_next,
            ChunkSlot::Heap(handle) => self.heap[handle.0].next,
        };
        next.map(ChunkSlot::Heap)
    }

    fn write_current(&mut self, data: &[u8]) -> usize {
        let (storage, occupied) = match self.cursor {
            ChunkSlot::Inline => (&mut self.inline[..], &mut self.inline_occupied),
            ChunkSlot::Heap(handle) => {
                let chunk = &mut self.heap[handle.0];
                (&mut chunk.data[..], &mut chunk.occupied)
            }
        };
        let count = data.len().min(N - *occupied);
        storage[*occupied..*occupied + count].copy_from_slice(&data[..count]);
        *occupied += count;
        count
    }

    fn advance(&mut self) -> Result<(), ChunkBufError> {
        if let Some(next) = self.next_slot(self.cursor) {
            log::trace!("reusing chunk {}", self.chunks_in_use);
            self.cursor = next;
            self.chunks_in_use += 1;
            return Ok(());
        }

        let handle = self.allocate_chunk()?;
        match self.cursor {
            ChunkSlot::Inline => self.inline_next = Some(handle),
            ChunkSlot::Heap(current) => self.heap[current.0].next = Some(handle),
        }
        self.cursor = ChunkSlot::Heap(handle);
        self.chunks_in_use += 1;
        Ok(())
    }

    fn allocate_chunk(&mut self) -> Result<ChunkHandle, ChunkBufError> {
        let mut data = Vec::new();
        data.try_reserve_exact(N)
            .map_err(|_| ChunkBufError::OutOfMemory { requested: N })?;
        data.resize(N, 0);
        self.heap
            .try_reserve(1)
            .map_err(|_| ChunkBufError::OutOfMemory { requested: N })?;

        let handle = ChunkHandle(self.heap.len());
        log::trace!("allocating chunk {} of {} bytes", handle.0 + 1, N);
        self.heap.push(HeapChunk {
            data,
            occupied: 0,
            next: None,
        });
        Ok(handle)
    }
}

impl<const N: usize> Default for ChunkBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> embedded_io::ErrorType for ChunkBuf<N> {
    type Error = ChunkBufError;
}

impl<const N: usize> embedded_io::Write for ChunkBuf<N> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.append_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
