#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcResponseMeta {
    #[prost(int32, tag = "1")]
    pub error_code: i32,

    #[prost(string, tag = "2")]
    pub error_text: ::prost::alloc::string::String,
}

impl RpcResponseMeta {
    pub fn new(error_code: i32, error_text: impl Into<String>) -> Self {
        Self {
            error_code,
            error_text: error_text.into(),
        }
    }
}
