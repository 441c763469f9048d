use crate::{
    constants::MAGIC_CODE,
    meta::{ChunkInfo, CompressType, RpcMeta, RpcRequestMetaExtField, Trace},
    package::{RpcDataPackage, RpcHeadMeta},
    utils::now,
};
use bytes::Bytes;

/// Assembles an [`RpcDataPackage`].
///
/// Request-side setters create the request meta on first use, response-side
/// setters create the response meta; meta-level setters create the meta.
/// Only `magic_code` creates the head, so a package built without it cannot
/// be encoded.
///
/// ```rust
/// use prpc::package::RpcDataPackage;
///
/// let mut package = RpcDataPackage::builder()
///     .magic_code(*b"PRPC")
///     .service_name("Echo")
///     .method_name("say")
///     .correlation_id(1)
///     .data(b"hello".to_vec())
///     .build();
///
/// let bytes = package.encode().unwrap();
/// assert_eq!(&bytes[..4], b"PRPC");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RpcDataPackageBuilder {
    head: Option<RpcHeadMeta>,
    rpc_meta: Option<RpcMeta>,
    data: Option<Bytes>,
    attachment: Option<Bytes>,
}

impl RpcDataPackageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_package(package: RpcDataPackage) -> Self {
        Self {
            head: package.head,
            rpc_meta: package.rpc_meta,
            data: package.data,
            attachment: package.attachment,
        }
    }

    pub fn magic_code(mut self, magic_code: [u8; 4]) -> Self {
        self.head.get_or_insert_with(RpcHeadMeta::default).magic_code = magic_code;
        self
    }

    /// Shorthand for `magic_code(MAGIC_CODE)`.
    pub fn prpc(self) -> Self {
        self.magic_code(MAGIC_CODE)
    }

    pub fn service_name(mut self, service_name: impl Into<String>) -> Self {
        self.meta().request_mut().service_name = service_name.into();
        self
    }

    pub fn method_name(mut self, method_name: impl Into<String>) -> Self {
        self.meta().request_mut().method_name = method_name.into();
        self
    }

    pub fn log_id(mut self, log_id: i64) -> Self {
        self.meta().request_mut().log_id = log_id;
        self
    }

    pub fn trace(mut self, trace: Trace) -> Self {
        trace.apply_to(self.meta().request_mut());
        self
    }

    /// Appends one request extension field. Fields keep insertion order.
    pub fn ext_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta()
            .request_mut()
            .rpc_request_meta_ext
            .push(RpcRequestMetaExtField::new(key, value));
        self
    }

    pub fn extra_params(mut self, params: impl Into<Bytes>) -> Self {
        self.meta().request_mut().extra_param = Some(params.into());
        self
    }

    pub fn error_code(mut self, error_code: impl Into<i32>) -> Self {
        self.meta().response_mut().error_code = error_code.into();
        self
    }

    pub fn error_text(mut self, error_text: impl Into<String>) -> Self {
        self.meta().response_mut().error_text = error_text.into();
        self
    }

    pub fn correlation_id(mut self, correlation_id: i64) -> Self {
        self.meta().correlation_id = correlation_id;
        self
    }

    pub fn compress_type(mut self, compress_type: CompressType) -> Self {
        self.meta().set_compress_type(compress_type);
        self
    }

    pub fn authentication_data(mut self, authentication_data: impl Into<Bytes>) -> Self {
        self.meta().authentication_data = Some(authentication_data.into());
        self
    }

    pub fn chunk_info(mut self, stream_id: i64, chunk_id: i64) -> Self {
        self.meta().chunk_info = Some(ChunkInfo::new(stream_id, chunk_id));
        self
    }

    pub fn data(mut self, data: impl Into<Bytes>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn attachment(mut self, attachment: impl Into<Bytes>) -> Self {
        self.attachment = Some(attachment.into());
        self
    }

    pub fn build(self) -> RpcDataPackage {
        RpcDataPackage {
            head: self.head,
            rpc_meta: self.rpc_meta,
            data: self.data,
            attachment: self.attachment,
            timestamp_micros: now(),
        }
    }

    fn meta(&mut self) -> &mut RpcMeta {
        self.rpc_meta.get_or_insert_with(RpcMeta::default)
    }
}
