use crate::core::{ChunkBuf, ChunkSlot};

/// Iterator over the occupied bytes of each chunk in a `ChunkBuf`
///
/// This iterator implements `Clone`.
#[derive(Clone)]
pub struct Chunks<'a, const N: usize> {
    buf: &'a ChunkBuf<N>,
    slot: Option<ChunkSlot>,
    remaining: usize,
}

impl<'a, const N: usize> Chunks<'a, N> {
    pub(crate) fn new(buf: &'a ChunkBuf<N>, in_use: usize) -> Self {
        Self {
            buf,
            slot: Some(ChunkSlot::Inline),
            remaining: in_use,
        }
    }
}

impl<'a, const N: usize> Iterator for Chunks<'a, N> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.slot?;
        self.remaining -= 1;
        self.slot = self.buf.next_slot(slot);
        Some(self.buf.slot_bytes(slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const N: usize> ExactSizeIterator for Chunks<'_, N> {}

impl<'a, const N: usize> IntoIterator for &'a ChunkBuf<N> {
    type Item = &'a [u8];
    type IntoIter = Chunks<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks()
    }
}
