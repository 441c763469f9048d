use crate::package::RpcDataPackage;
use bytes::BytesMut;
use std::collections::HashMap;

/// Reassembles chunk streams produced by [`RpcDataPackage::split`].
///
/// Chunks of several streams may be interleaved, but the chunks of any one
/// stream must be pushed in transmission order: chunk ids only mark the end
/// of a stream, they are not used to reorder or detect gaps.
#[derive(Default)]
pub struct RpcChunkAssembler {
    streams: HashMap<i64, PendingStream>, // Keyed by chunk stream id
}

struct PendingStream {
    first: RpcDataPackage,
    buffer: BytesMut,
    chunk_count: usize,
}

impl PendingStream {
    fn new(mut first: RpcDataPackage) -> Self {
        let buffer = first
            .data
            .take()
            .map(|data| BytesMut::from(&data[..]))
            .unwrap_or_default();

        Self {
            first,
            buffer,
            chunk_count: 1,
        }
    }

    fn append(&mut self, chunk: RpcDataPackage) {
        if let Some(data) = &chunk.data {
            self.buffer.extend_from_slice(data);
        }

        // Contractually only chunk 0 carries one; keep whichever did
        if self.first.attachment.is_none() {
            self.first.attachment = chunk.attachment;
        }

        self.chunk_count += 1;
    }

    fn finish(mut self) -> RpcDataPackage {
        if !self.buffer.is_empty() {
            self.first.data = Some(self.buffer.freeze());
        }

        if let Some(meta) = self.first.rpc_meta.as_mut() {
            meta.chunk_info = None;
        }

        self.first
    }
}

impl RpcChunkAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one received package.
    ///
    /// Returns the complete package when `package` finishes its stream, with
    /// the merged data and the chunk info cleared. Unchunked packages are
    /// returned as they are.
    pub fn push(&mut self, package: RpcDataPackage) -> Option<RpcDataPackage> {
        let Some(stream_id) = package.chunk_stream_id() else {
            return Some(package);
        };
        let is_final = package.is_final_package();

        match self.streams.remove(&stream_id) {
            Some(mut stream) => {
                stream.append(package);
                if !is_final {
                    self.streams.insert(stream_id, stream);
                    return None;
                }

                tracing::debug!(
                    stream_id,
                    chunk_count = stream.chunk_count,
                    "Reassembled chunk stream"
                );
                Some(stream.finish())
            }
            None => {
                let stream = PendingStream::new(package);
                if !is_final {
                    self.streams.insert(stream_id, stream);
                    return None;
                }
                Some(stream.finish())
            }
        }
    }

    /// Number of streams still waiting for their final chunk.
    pub fn pending_streams(&self) -> usize {
        self.streams.len()
    }

    /// Drops a partially received stream, returning whether it existed.
    pub fn discard(&mut self, stream_id: i64) -> bool {
        self.streams.remove(&stream_id).is_some()
    }
}
