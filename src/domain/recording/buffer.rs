//! In-memory chunk buffer filled during a capture

/// Ordered, append-only list of raw chunks read from the input device.
///
/// Owned by the capture worker until it is turned into a recording.
#[derive(Debug, Default)]
pub struct RecordingBuffer {
    chunks: Vec<Vec<u8>>,
    total_bytes: usize,
}

impl RecordingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk, keeping read order
    pub fn push(&mut self, chunk: Vec<u8>) {
        self.total_bytes += chunk.len();
        self.chunks.push(chunk);
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Concatenate all chunks in the order they were pushed
    pub fn into_samples(self) -> Vec<u8> {
        let mut samples = Vec::with_capacity(self.total_bytes);
        for chunk in self.chunks {
            samples.extend_from_slice(&chunk);
        }
        samples
    }
}
