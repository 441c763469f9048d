use bytes::Bytes;

/// Request half of the meta: routing target plus call-scoped context.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcRequestMeta {
    #[prost(string, required, tag = "1")]
    pub service_name: ::prost::alloc::string::String,

    #[prost(string, required, tag = "2")]
    pub method_name: ::prost::alloc::string::String,

    /// Log id used to correlate server-side log lines with the call.
    #[prost(int64, tag = "3")]
    pub log_id: i64,

    #[prost(int64, tag = "4")]
    pub trace_id: i64,

    #[prost(int64, tag = "5")]
    pub span_id: i64,

    #[prost(int64, tag = "6")]
    pub parent_span_id: i64,

    /// Ordered key/value extensions. Order is preserved on the wire.
    #[prost(message, repeated, tag = "7")]
    pub rpc_request_meta_ext: ::prost::alloc::vec::Vec<RpcRequestMetaExtField>,

    #[prost(string, tag = "8")]
    pub trace_key: ::prost::alloc::string::String,

    #[prost(bytes = "bytes", optional, tag = "110")]
    pub extra_param: ::core::option::Option<Bytes>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcRequestMetaExtField {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,

    #[prost(string, tag = "2")]
    pub value: ::prost::alloc::string::String,
}

impl RpcRequestMetaExtField {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
