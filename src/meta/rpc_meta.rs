use crate::meta::{ChunkInfo, CompressType, RpcRequestMeta, RpcResponseMeta};
use bytes::Bytes;
use prost::Message;

/// Structured meta section of a package.
///
/// Encoded as a protobuf message and placed right after the head. A package
/// plays either the request role or the response role, so at most one of
/// `request` / `response` is expected to be set.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcMeta {
    #[prost(message, optional, tag = "1")]
    pub request: ::core::option::Option<RpcRequestMeta>,

    #[prost(message, optional, tag = "2")]
    pub response: ::core::option::Option<RpcResponseMeta>,

    #[prost(enumeration = "CompressType", tag = "3")]
    pub compress_type: i32,

    /// Caller-side id for matching an asynchronous response to its request.
    #[prost(int64, tag = "4")]
    pub correlation_id: i64,

    /// Rewritten from the actual attachment length every time the owning
    /// package is encoded.
    #[prost(int32, tag = "5")]
    pub attachment_size: i32,

    #[prost(message, optional, tag = "6")]
    pub chunk_info: ::core::option::Option<ChunkInfo>,

    #[prost(bytes = "bytes", optional, tag = "7")]
    pub authentication_data: ::core::option::Option<Bytes>,
}

impl RpcMeta {
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    pub fn from_bytes(buf: &[u8]) -> Result<Self, prost::DecodeError> {
        Self::decode(buf)
    }

    /// Returns the request meta, creating an empty one if absent.
    pub(crate) fn request_mut(&mut self) -> &mut RpcRequestMeta {
        self.request.get_or_insert_with(RpcRequestMeta::default)
    }

    /// Returns the response meta, creating an empty one if absent.
    pub(crate) fn response_mut(&mut self) -> &mut RpcResponseMeta {
        self.response.get_or_insert_with(RpcResponseMeta::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::RpcRequestMetaExtField;

    #[test]
    fn empty_meta_encodes_to_nothing() {
        assert!(RpcMeta::default().to_bytes().is_empty());
        assert_eq!(RpcMeta::from_bytes(&[]).unwrap(), RpcMeta::default());
    }

    #[test]
    fn all_fields_survive_the_codec() {
        let meta = RpcMeta {
            request: Some(RpcRequestMeta {
                service_name: "Echo".into(),
                method_name: "say".into(),
                log_id: 42,
                trace_id: 7,
                span_id: 8,
                parent_span_id: 9,
                rpc_request_meta_ext: vec![
                    RpcRequestMetaExtField::new("b", "2"),
                    RpcRequestMetaExtField::new("a", "1"),
                ],
                trace_key: "tk".into(),
                extra_param: Some(Bytes::from_static(b"extra")),
            }),
            response: None,
            compress_type: CompressType::Gzip as i32,
            correlation_id: -5,
            attachment_size: 3,
            chunk_info: Some(ChunkInfo::new(99, 0)),
            authentication_data: Some(Bytes::from_static(b"token")),
        };

        let decoded = RpcMeta::from_bytes(&meta.to_bytes()).unwrap();
        assert_eq!(decoded, meta);
        assert_eq!(decoded.compress_type(), CompressType::Gzip);
    }

    #[test]
    fn required_chunk_fields_are_always_written() {
        let with_zero_chunk = RpcMeta {
            chunk_info: Some(ChunkInfo::new(0, 0)),
            ..Default::default()
        };

        // Field 6, length-delimited, carrying both required zero varints
        assert_eq!(with_zero_chunk.to_bytes(), vec![0x32, 0x04, 0x08, 0x00, 0x10, 0x00]);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(RpcMeta::from_bytes(&[0xff, 0xff, 0xff]).is_err());
    }
}
