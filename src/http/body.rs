use bytes::Bytes;

/// Capacity of every body chunk and of the header buffer.
pub const CHUNK_SIZE: usize = 4096;

/// Append-only accumulator for a response body.
///
/// The body is stored as an ordered list of sealed fixed-capacity chunks
/// plus one current chunk receiving new bytes. When the current chunk fills
/// it is sealed and a fresh one started; [`finish`](Self::finish) seals the
/// current chunk at its filled length. Consumers iterate the sealed chunks
/// in order to reconstruct the byte stream. There is no compaction and no
/// random access.
pub struct BodyChunks {
    sealed: Vec<Bytes>,
    current: Vec<u8>,
    filled: usize,
}

impl BodyChunks {
    pub fn new() -> Self {
        Self {
            sealed: Vec::new(),
            current: vec![0; CHUNK_SIZE],
            filled: 0,
        }
    }

    /// Creates an accumulator whose first sealed chunk holds `leftover`,
    /// the body bytes that arrived appended to the same read as the header
    /// terminator. An empty leftover queues nothing.
    pub fn with_leftover(leftover: &[u8]) -> Self {
        let mut chunks = Self::new();
        if !leftover.is_empty() {
            chunks.sealed.push(Bytes::copy_from_slice(leftover));
        }
        chunks
    }

    /// The writable spare region of the current chunk.
    pub fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.current[self.filled..]
    }

    /// Records `n` bytes written into the spare region. A chunk that fills
    /// completely is sealed and replaced with a fresh empty one.
    pub fn advance(&mut self, n: usize) {
        debug_assert!(self.filled + n <= CHUNK_SIZE);
        self.filled += n;
        if self.filled == CHUNK_SIZE {
            let full = std::mem::replace(&mut self.current, vec![0; CHUNK_SIZE]);
            self.sealed.push(Bytes::from(full));
            self.filled = 0;
        }
    }

    /// Number of sealed chunks so far (not counting the current one).
    pub fn sealed_len(&self) -> usize {
        self.sealed.len()
    }

    /// Fill level of the current chunk.
    pub fn current_len(&self) -> usize {
        self.filled
    }

    /// Seals the current chunk at its filled length and returns the ordered
    /// chunk list. Called once, when the peer has closed the stream. An
    /// empty current chunk is dropped rather than sealed.
    pub fn finish(mut self) -> Vec<Bytes> {
        if self.filled > 0 {
            self.current.truncate(self.filled);
            self.sealed.push(Bytes::from(self.current));
        }
        self.sealed
    }
}

impl Default for BodyChunks {
    fn default() -> Self {
        Self::new()
    }
}

/// Concatenates a chunk list back into a single byte vector.
pub fn assemble(chunks: &[Bytes]) -> Vec<u8> {
    let total = chunks.iter().map(|c| c.len()).sum();
    let mut out = Vec::with_capacity(total);
    for chunk in chunks {
        out.extend_from_slice(chunk);
    }
    out
}
