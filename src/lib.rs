//! Baidu-style RPC packet model.
//!
//! A package on the wire is laid out as:
//!
//! ```text
//! -------------------------------------
//! | Head | Meta | Data | Attachment |
//! -------------------------------------
//! ```
//!
//! The head is a fixed 12-byte prefix (`PRPC`, total size, meta size), the
//! meta is a protobuf-encoded `RpcMeta`, and the remaining bytes are split
//! between data and attachment using the sizes declared in head and meta.
pub mod constants;
pub mod meta;
pub mod package;
pub mod utils;
