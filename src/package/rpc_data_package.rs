use crate::{
    constants::{FINAL_CHUNK_ID, RPC_HEAD_SIZE},
    meta::{ChunkInfo, CompressType, RpcMeta, RpcRequestMeta, RpcResponseMeta, Trace},
    package::{PackageDecodeError, PackageEncodeError, RpcDataPackageBuilder, RpcHeadMeta},
    utils::{generate_stream_id, now},
};
use bytes::{Bytes, BytesMut};

/// One wire-transmissible unit: head, meta, data and attachment.
///
/// Packages are assembled with [`RpcDataPackageBuilder`] or produced by
/// [`RpcDataPackage::decode`]. Data and attachment are immutable [`Bytes`]:
/// clones (including the chunks produced by [`RpcDataPackage::split`]) may
/// share buffers, but no operation writes into a shared buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcDataPackage {
    pub(crate) head: Option<RpcHeadMeta>,
    pub(crate) rpc_meta: Option<RpcMeta>,
    pub(crate) data: Option<Bytes>,
    pub(crate) attachment: Option<Bytes>,
    pub(crate) timestamp_micros: u64,
}

impl RpcDataPackage {
    pub fn builder() -> RpcDataPackageBuilder {
        RpcDataPackageBuilder::new()
    }

    /// Turns the package back into a builder, e.g. to derive a response.
    pub fn into_builder(self) -> RpcDataPackageBuilder {
        RpcDataPackageBuilder::from_package(self)
    }

    pub fn head(&self) -> Option<&RpcHeadMeta> {
        self.head.as_ref()
    }

    pub fn rpc_meta(&self) -> Option<&RpcMeta> {
        self.rpc_meta.as_ref()
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub fn attachment(&self) -> Option<&[u8]> {
        self.attachment.as_deref()
    }

    /// Construction or decode time, in microseconds since the UNIX epoch.
    pub fn timestamp(&self) -> u64 {
        self.timestamp_micros
    }

    pub fn service_name(&self) -> Option<&str> {
        self.request_field(|request| request.service_name.as_str())
    }

    pub fn method_name(&self) -> Option<&str> {
        self.request_field(|request| request.method_name.as_str())
    }

    pub fn log_id(&self) -> Option<i64> {
        self.request_field(|request| request.log_id)
    }

    pub fn trace(&self) -> Option<Trace> {
        self.request_field(|request| Trace::from(request))
    }

    pub fn extra_params(&self) -> Option<&[u8]> {
        self.rpc_meta
            .as_ref()
            .and_then(|meta| meta.request.as_ref())
            .and_then(|request| request.extra_param.as_deref())
    }

    pub fn error_code(&self) -> Option<i32> {
        self.response_meta().map(|response| response.error_code)
    }

    pub fn error_text(&self) -> Option<&str> {
        self.response_meta()
            .map(|response| response.error_text.as_str())
    }

    /// `0` when the package has no meta.
    pub fn correlation_id(&self) -> i64 {
        self.rpc_meta
            .as_ref()
            .map_or(0, |meta| meta.correlation_id)
    }

    pub fn compress_type(&self) -> CompressType {
        self.rpc_meta
            .as_ref()
            .map_or(CompressType::NoCompress, RpcMeta::compress_type)
    }

    pub fn authentication_data(&self) -> Option<&[u8]> {
        self.rpc_meta
            .as_ref()
            .and_then(|meta| meta.authentication_data.as_deref())
    }

    pub fn chunk_info(&self) -> Option<ChunkInfo> {
        self.rpc_meta.as_ref().and_then(|meta| meta.chunk_info)
    }

    pub fn chunk_stream_id(&self) -> Option<i64> {
        self.chunk_info().map(|chunk_info| chunk_info.stream_id)
    }

    pub fn is_chunk_package(&self) -> bool {
        self.chunk_info().is_some()
    }

    /// True for unchunked packages and for the terminal chunk of a stream.
    pub fn is_final_package(&self) -> bool {
        self.chunk_info()
            .is_none_or(|chunk_info| chunk_info.chunk_id == FINAL_CHUNK_ID)
    }

    /// Appends `data` to this package's data.
    ///
    /// Used to reassemble a chunk stream: starting from the first chunk,
    /// append each following chunk's data until the final chunk is merged.
    /// A new buffer is allocated, so clones sharing the old one are unaffected.
    pub fn merge_data(&mut self, data: &[u8]) {
        self.data = Some(match self.data.take() {
            None => Bytes::copy_from_slice(data),
            Some(existing) if data.is_empty() => existing,
            Some(existing) => {
                let mut merged = BytesMut::with_capacity(existing.len() + data.len());
                merged.extend_from_slice(&existing);
                merged.extend_from_slice(data);
                merged.freeze()
            }
        });
    }

    /// Writes the package to bytes.
    ///
    /// The size fields are computed from the current data and attachment and
    /// stored back into the package: `rpc_meta.attachment_size`,
    /// `head.meta_size` and `head.total_size` reflect the emitted bytes once
    /// this returns `Ok`.
    pub fn encode(&mut self) -> Result<Vec<u8>, PackageEncodeError> {
        let Some(head) = self.head.as_mut() else {
            return Err(PackageEncodeError::MissingHead);
        };
        let Some(rpc_meta) = self.rpc_meta.as_mut() else {
            return Err(PackageEncodeError::MissingMeta);
        };

        let data_size = self.data.as_ref().map_or(0, Bytes::len);
        let attachment_size = self.attachment.as_ref().map_or(0, Bytes::len);

        let Ok(attachment_size_field) = i32::try_from(attachment_size) else {
            return Err(PackageEncodeError::SizeOverflow {
                total_size: data_size.saturating_add(attachment_size),
            });
        };

        let previous_attachment_size =
            std::mem::replace(&mut rpc_meta.attachment_size, attachment_size_field);
        let meta_bytes = rpc_meta.to_bytes();
        let meta_size = meta_bytes.len();
        let total_size = data_size
            .saturating_add(attachment_size)
            .saturating_add(meta_size);

        let Ok(total_size_field) = i32::try_from(total_size) else {
            rpc_meta.attachment_size = previous_attachment_size;
            return Err(PackageEncodeError::SizeOverflow { total_size });
        };

        // meta_size <= total_size, so it fits as well
        head.meta_size = meta_size as i32;
        head.total_size = total_size_field;

        let mut buf = Vec::with_capacity(RPC_HEAD_SIZE + total_size);
        buf.extend_from_slice(&head.encode());
        buf.extend_from_slice(&meta_bytes);
        if let Some(data) = &self.data {
            buf.extend_from_slice(data);
        }
        if let Some(attachment) = &self.attachment {
            buf.extend_from_slice(attachment);
        }

        Ok(buf)
    }

    /// Reads one package from the start of `buf`.
    ///
    /// Section boundaries come only from the declared sizes: meta is
    /// `head.meta_size` bytes, attachment is `meta.attachment_size` bytes and
    /// data is whatever `head.total_size` leaves over. Any section running
    /// past the end of `buf` is an error; nothing is truncated.
    pub fn decode(buf: &[u8]) -> Result<Self, PackageDecodeError> {
        let head = RpcHeadMeta::decode(buf)?;

        if !head.has_valid_magic() {
            tracing::warn!(
                "Decoding package with unexpected magic code {:?}",
                head.magic_code
            );
        }

        let meta_size = usize::try_from(head.meta_size).map_err(|_| {
            PackageDecodeError::NegativeSize {
                field: "meta_size",
                value: head.meta_size,
            }
        })?;

        let meta_end = RPC_HEAD_SIZE + meta_size;
        let meta_bytes =
            buf.get(RPC_HEAD_SIZE..meta_end)
                .ok_or(PackageDecodeError::IncompleteMeta {
                    meta_size,
                    available: buf.len() - RPC_HEAD_SIZE,
                })?;

        let rpc_meta = RpcMeta::from_bytes(meta_bytes)?;

        let attachment_size = usize::try_from(rpc_meta.attachment_size).map_err(|_| {
            PackageDecodeError::NegativeSize {
                field: "attachment_size",
                value: rpc_meta.attachment_size,
            }
        })?;

        let data_size = i64::from(head.total_size)
            - i64::from(head.meta_size)
            - i64::from(rpc_meta.attachment_size);

        let Ok(data_size) = usize::try_from(data_size) else {
            return Err(PackageDecodeError::NegativeDataSize {
                total_size: head.total_size,
                meta_size: head.meta_size,
                attachment_size: rpc_meta.attachment_size,
            });
        };

        let data_end = meta_end + data_size;
        let attachment_end = data_end + attachment_size;

        if buf.len() < attachment_end {
            return Err(PackageDecodeError::IncompletePayload {
                expected: data_size + attachment_size,
                available: buf.len() - meta_end,
            });
        }

        let data = (data_size > 0).then(|| Bytes::copy_from_slice(&buf[meta_end..data_end]));
        let attachment = (attachment_size > 0)
            .then(|| Bytes::copy_from_slice(&buf[data_end..attachment_end]));

        Ok(Self {
            head: Some(head),
            rpc_meta: Some(rpc_meta),
            data,
            attachment,
            timestamp_micros: now(),
        })
    }

    /// Splits the data into chunks of at most `chunk_size` bytes.
    ///
    /// Returns `vec![self]` untouched when `chunk_size` is zero, when there is
    /// no data, or when the data already fits. Otherwise every chunk is a
    /// copy of this package with its slice of the data and a shared, freshly
    /// generated stream id. Chunk ids count up from `0`; the last chunk gets
    /// `FINAL_CHUNK_ID`. Only the first chunk keeps the attachment.
    ///
    /// Chunks must be delivered in the returned order.
    pub fn split(self, chunk_size: usize) -> Vec<RpcDataPackage> {
        let data = match &self.data {
            Some(data) if chunk_size >= 1 && chunk_size < data.len() => data.clone(),
            _ => return vec![self],
        };

        let stream_id = generate_stream_id();
        let mut chunks = Vec::with_capacity(data.len().div_ceil(chunk_size));

        for (index, start) in (0..data.len()).step_by(chunk_size).enumerate() {
            let end = (start + chunk_size).min(data.len());
            let chunk_id = if end == data.len() {
                FINAL_CHUNK_ID
            } else {
                index as i64
            };

            let mut chunk = self.clone();
            chunk.data = Some(data.slice(start..end));
            if index > 0 {
                chunk.attachment = None;
            }
            chunk
                .rpc_meta
                .get_or_insert_with(RpcMeta::default)
                .chunk_info = Some(ChunkInfo::new(stream_id, chunk_id));

            tracing::trace!(stream_id, chunk_id, len = end - start, "Split chunk");

            chunks.push(chunk);
        }

        tracing::debug!(
            stream_id,
            chunk_count = chunks.len(),
            data_len = data.len(),
            "Split package into chunks"
        );

        chunks
    }

    /// Builds the error response for this request.
    ///
    /// Head and meta are carried over (correlation id, compress type and chunk
    /// info included); the request meta is replaced by the response meta.
    /// Data and attachment are not carried over. A package without a head
    /// gets a default `PRPC` head so the response can always be encoded.
    pub fn error_response(
        &self,
        error_code: impl Into<i32>,
        error_text: impl Into<String>,
    ) -> RpcDataPackage {
        let mut rpc_meta = self.rpc_meta.clone().unwrap_or_default();
        rpc_meta.request = None;
        rpc_meta.response = Some(RpcResponseMeta::new(error_code.into(), error_text));

        RpcDataPackage {
            head: Some(self.head.unwrap_or_default()),
            rpc_meta: Some(rpc_meta),
            data: None,
            attachment: None,
            timestamp_micros: now(),
        }
    }

    fn request_field<'a, T>(
        &'a self,
        f: impl FnOnce(&'a RpcRequestMeta) -> T,
    ) -> Option<T> {
        self.rpc_meta
            .as_ref()
            .and_then(|meta| meta.request.as_ref())
            .map(f)
    }

    fn response_meta(&self) -> Option<&RpcResponseMeta> {
        self.rpc_meta
            .as_ref()
            .and_then(|meta| meta.response.as_ref())
    }
}
