use crate::constants::FINAL_CHUNK_ID;

/// Position of a package within a chunk stream.
///
/// All chunks produced by one split share `stream_id`. Non-terminal chunks are
/// numbered `0, 1, 2, ...` in transmission order and the last chunk carries
/// `FINAL_CHUNK_ID` (`-1`).
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ChunkInfo {
    #[prost(int64, required, tag = "1")]
    pub stream_id: i64,

    #[prost(int64, required, tag = "2")]
    pub chunk_id: i64,
}

impl ChunkInfo {
    pub fn new(stream_id: i64, chunk_id: i64) -> Self {
        Self {
            stream_id,
            chunk_id,
        }
    }

    /// Whether this is the terminal chunk of its stream.
    pub fn is_final(&self) -> bool {
        self.chunk_id == FINAL_CHUNK_ID
    }
}
