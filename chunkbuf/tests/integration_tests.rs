use chunkbuf::{ChunkBuf, ChunkBufError, DEFAULT_CHUNK_CAPACITY};

struct CollectSink {
    bytes: Vec<u8>,
    flushed: bool,
}

impl embedded_io::ErrorType for CollectSink {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io::Write for CollectSink {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushed = true;
        Ok(())
    }
}

struct FailingSink;

impl embedded_io::ErrorType for FailingSink {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io::Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> Result<usize, Self::Error> {
        Err(embedded_io::ErrorKind::Other)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 % 251) as u8).collect()
}

#[test]
fn test_new_buffer_is_empty() {
    let buf: ChunkBuf = ChunkBuf::new();
    assert!(buf.is_empty());
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.indirection_count(), 0);
    assert_eq!(buf.chunk_capacity(), DEFAULT_CHUNK_CAPACITY);
    assert_eq!(buf.chunks().count(), 1);
    assert_eq!(buf.combine().unwrap(), b"");
}

#[test]
fn test_append_within_first_chunk() {
    let mut buf: ChunkBuf<16> = ChunkBuf::new();
    buf.append_bytes(b"hello").unwrap();
    buf.append_str(", you").unwrap();

    assert_eq!(buf.len(), 10);
    assert_eq!(buf.indirection_count(), 0);
    assert_eq!(buf.combine().unwrap(), b"hello, you");
}

#[test]
fn test_append_splits_across_chunks() {
    let mut buf: ChunkBuf<4> = ChunkBuf::new();
    buf.append_bytes(b"abcdefghij").unwrap();

    let chunks: Vec<&[u8]> = buf.chunks().collect();
    assert_eq!(chunks, vec![&b"abcd"[..], &b"efgh"[..], &b"ij"[..]]);
    assert_eq!(buf.indirection_count(), 2);
    assert_eq!(buf.len(), 10);
}

#[test]
fn test_exact_fill_does_not_allocate() {
    let mut buf: ChunkBuf<4> = ChunkBuf::new();
    buf.append_bytes(b"abcd").unwrap();
    assert_eq!(buf.indirection_count(), 0);

    buf.append_bytes(b"").unwrap();
    assert_eq!(buf.indirection_count(), 0);

    buf.append_bytes(b"e").unwrap();
    assert_eq!(buf.indirection_count(), 1);
}

#[test]
fn test_one_allocation_per_overflow() {
    let mut buf: ChunkBuf<8> = ChunkBuf::new();
    buf.append_bytes(&pattern(8 * 5 + 3)).unwrap();
    assert_eq!(buf.indirection_count(), 5);
}

#[test]
fn test_chunk_boundary_invariance() {
    let payload = pattern(300);

    let mut whole: ChunkBuf<16> = ChunkBuf::new();
    whole.append_bytes(&payload).unwrap();
    let expected = whole.combine().unwrap();
    assert_eq!(expected, payload);

    for step in [1usize, 2, 3, 5, 7, 15, 16, 17, 64, 299] {
        let mut pieces: ChunkBuf<16> = ChunkBuf::new();
        for piece in payload.chunks(step) {
            pieces.append_bytes(piece).unwrap();
        }
        assert_eq!(pieces.combine().unwrap(), expected, "step {step}");
        assert_eq!(pieces.len(), payload.len());
        assert_eq!(pieces.indirection_count(), whole.indirection_count());
    }
}

#[test]
fn test_code_point_encoding() {
    let mut buf: ChunkBuf<3> = ChunkBuf::new();
    for cp in ['a', 'é', '你', '🦀'] {
        buf.append_code_point(cp).unwrap();
    }
    assert_eq!(buf.len(), 1 + 2 + 3 + 4);
    assert_eq!(String::from_utf8(buf.combine().unwrap()).unwrap(), "aé你🦀");
}

#[test]
fn test_traverse_visits_chunks_in_order() {
    let mut buf: ChunkBuf<5> = ChunkBuf::new();
    buf.append_str("0123456789ab").unwrap();

    let mut visited = Vec::new();
    buf.traverse(|chunk| visited.push(chunk.len()));
    assert_eq!(visited, vec![5, 5, 2]);

    let mut joined = Vec::new();
    for chunk in &buf {
        joined.extend_from_slice(chunk);
    }
    assert_eq!(joined, b"0123456789ab");
}

#[test]
fn test_chunks_iterator_is_exact_size() {
    let mut buf: ChunkBuf<2> = ChunkBuf::new();
    buf.append_str("abcde").unwrap();

    let mut chunks = buf.chunks();
    assert_eq!(chunks.len(), 3);
    chunks.next();
    assert_eq!(chunks.len(), 2);
    let rest = chunks.clone();
    assert_eq!(rest.count(), 2);
}

#[test]
fn test_combine_reserves_whole_capacity() {
    let mut buf: ChunkBuf<8> = ChunkBuf::new();
    buf.append_str("0123456789").unwrap();

    let combined = buf.combine().unwrap();
    assert_eq!(combined, b"0123456789");
    assert!(combined.capacity() >= (buf.indirection_count() + 1) * 8);
    assert_eq!(buf.capacity(), 16);
}

#[test]
fn test_reset_is_idempotent_with_fresh_buffer() {
    let mut reused: ChunkBuf<4> = ChunkBuf::new();
    reused.append_bytes(&pattern(37)).unwrap();
    reused.reset();
    reused.append_bytes(b"second payload").unwrap();

    let mut fresh: ChunkBuf<4> = ChunkBuf::new();
    fresh.append_bytes(b"second payload").unwrap();

    assert_eq!(reused.combine().unwrap(), fresh.combine().unwrap());
    assert_eq!(reused.len(), fresh.len());
    assert_eq!(reused.chunks().count(), fresh.chunks().count());
}

#[test]
fn test_reset_keeps_chunks_for_reuse() {
    let mut buf: ChunkBuf<4> = ChunkBuf::new();
    buf.append_bytes(&pattern(20)).unwrap();
    assert_eq!(buf.indirection_count(), 4);

    buf.reset();
    assert!(buf.is_empty());
    assert_eq!(buf.indirection_count(), 4);
    assert_eq!(buf.chunks().count(), 1);

    buf.append_bytes(&pattern(20)).unwrap();
    assert_eq!(buf.indirection_count(), 4);
    assert_eq!(buf.combine().unwrap(), pattern(20));

    buf.append_bytes(b"x").unwrap();
    assert_eq!(buf.indirection_count(), 5);
}

#[test]
fn test_release_frees_heap_chunks() {
    let mut buf: ChunkBuf<4> = ChunkBuf::new();
    buf.append_bytes(&pattern(20)).unwrap();
    buf.release();

    assert!(buf.is_empty());
    assert_eq!(buf.indirection_count(), 0);
    assert_eq!(buf.capacity(), 4);

    buf.append_bytes(b"abcdef").unwrap();
    assert_eq!(buf.indirection_count(), 1);
    assert_eq!(buf.combine().unwrap(), b"abcdef");
}

#[test]
fn test_clone_is_independent() {
    let mut original: ChunkBuf<4> = ChunkBuf::new();
    original.append_str("abcdef").unwrap();

    let mut copy = original.clone();
    copy.append_str("gh").unwrap();
    original.append_str("XY").unwrap();

    assert_eq!(original.combine().unwrap(), b"abcdefXY");
    assert_eq!(copy.combine().unwrap(), b"abcdefgh");
}

#[test]
fn test_drain_into_writer() {
    let mut buf: ChunkBuf<4> = ChunkBuf::new();
    buf.append_str("drained in order").unwrap();

    let mut sink = CollectSink {
        bytes: Vec::new(),
        flushed: false,
    };
    buf.drain_into(&mut sink).unwrap();
    assert_eq!(sink.bytes, b"drained in order");
    assert!(sink.flushed);
    assert_eq!(buf.len(), 16);
}

#[test]
fn test_drain_into_failing_writer() {
    let mut buf: ChunkBuf<4> = ChunkBuf::new();
    buf.append_str("abc").unwrap();

    let result = buf.drain_into(&mut FailingSink);
    assert_eq!(
        result,
        Err(ChunkBufError::Sink {
            kind: embedded_io::ErrorKind::Other
        })
    );
}

#[test]
fn test_buffer_as_embedded_io_sink() {
    use embedded_io::Write;

    let mut buf: ChunkBuf<4> = ChunkBuf::new();
    buf.write_all(b"written ").unwrap();
    buf.write_all(b"through the trait").unwrap();
    buf.flush().unwrap();
    assert_eq!(buf.combine().unwrap(), b"written through the trait");
}

#[test]
fn test_error_display() {
    let err = ChunkBufError::OutOfMemory { requested: 1024 };
    assert_eq!(
        err.to_string(),
        "Out of memory: failed to allocate a chunk of 1024 bytes"
    );
}
