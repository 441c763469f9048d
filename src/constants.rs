// Head related constants

/// Magic code opening every package head.
pub const MAGIC_CODE: [u8; 4] = *b"PRPC";

/// Byte offset of the 4-byte magic code.
pub const RPC_HEAD_MAGIC_OFFSET: usize = 0;

/// Byte offset of the total size field (i32, big-endian).
/// Counts meta + data + attachment bytes; the head itself is excluded.
pub const RPC_HEAD_TOTAL_SIZE_OFFSET: usize = 4;

/// Byte offset of the meta size field (i32, big-endian).
pub const RPC_HEAD_META_SIZE_OFFSET: usize = 8;

/// Fixed length of the package head.
pub const RPC_HEAD_SIZE: usize = 12;

// Chunk related constants

/// Chunk id carried by the last chunk of a stream.
pub const FINAL_CHUNK_ID: i64 = -1;

pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 64;

/// Upper bound on `RPC_HEAD_SIZE + total_size` accepted by the stream decoder.
pub const DEFAULT_MAX_PACKAGE_SIZE: usize = 64 * 1024 * 1024;
