mod chunk_info;
mod compress_type;
mod rpc_meta;
mod rpc_request_meta;
mod rpc_response_meta;
mod trace;

pub use chunk_info::ChunkInfo;
pub use compress_type::CompressType;
pub use rpc_meta::RpcMeta;
pub use rpc_request_meta::{RpcRequestMeta, RpcRequestMetaExtField};
pub use rpc_response_meta::RpcResponseMeta;
pub use trace::Trace;
