mod package_error;
mod rpc_chunk_assembler;
mod rpc_data_package;
mod rpc_data_package_builder;
mod rpc_error_code;
mod rpc_head_meta;
mod rpc_package_stream_decoder;

pub use package_error::{PackageDecodeError, PackageEncodeError};
pub use rpc_chunk_assembler::RpcChunkAssembler;
pub use rpc_data_package::RpcDataPackage;
pub use rpc_data_package_builder::RpcDataPackageBuilder;
pub use rpc_error_code::RpcErrorCode;
pub use rpc_head_meta::RpcHeadMeta;
pub use rpc_package_stream_decoder::{RpcPackageIterator, RpcPackageStreamDecoder};
