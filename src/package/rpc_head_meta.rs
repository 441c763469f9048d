use crate::{
    constants::{
        MAGIC_CODE, RPC_HEAD_MAGIC_OFFSET, RPC_HEAD_META_SIZE_OFFSET, RPC_HEAD_SIZE,
        RPC_HEAD_TOTAL_SIZE_OFFSET,
    },
    package::PackageDecodeError,
};

/// Fixed 12-byte head of every package.
///
/// ```text
/// ----------------------------------------------
/// | PRPC | TotalSize(int32) | MetaSize(int32) |
/// ----------------------------------------------
/// ```
///
/// Both size fields are big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcHeadMeta {
    /// Expected to be `PRPC`. Decoding keeps whatever was received so that
    /// callers can decide what to do with a foreign magic.
    pub magic_code: [u8; 4],

    /// Length of meta + data + attachment. The head is not counted.
    pub total_size: i32,

    /// Length of the encoded meta.
    pub meta_size: i32,
}

impl Default for RpcHeadMeta {
    fn default() -> Self {
        Self::new(MAGIC_CODE)
    }
}

impl RpcHeadMeta {
    pub fn new(magic_code: [u8; 4]) -> Self {
        Self {
            magic_code,
            total_size: 0,
            meta_size: 0,
        }
    }

    pub fn has_valid_magic(&self) -> bool {
        self.magic_code == MAGIC_CODE
    }

    pub fn encode(&self) -> [u8; RPC_HEAD_SIZE] {
        let mut buf = [0u8; RPC_HEAD_SIZE];
        buf[RPC_HEAD_MAGIC_OFFSET..RPC_HEAD_TOTAL_SIZE_OFFSET].copy_from_slice(&self.magic_code);
        buf[RPC_HEAD_TOTAL_SIZE_OFFSET..RPC_HEAD_META_SIZE_OFFSET]
            .copy_from_slice(&self.total_size.to_be_bytes());
        buf[RPC_HEAD_META_SIZE_OFFSET..RPC_HEAD_SIZE].copy_from_slice(&self.meta_size.to_be_bytes());
        buf
    }

    /// Parses the first 12 bytes of `buf`. Trailing bytes are ignored.
    pub fn decode(buf: &[u8]) -> Result<Self, PackageDecodeError> {
        let head: &[u8; RPC_HEAD_SIZE] = buf
            .get(..RPC_HEAD_SIZE)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or(PackageDecodeError::IncompleteHead {
                available: buf.len(),
            })?;

        let mut magic_code = [0u8; 4];
        magic_code.copy_from_slice(&head[RPC_HEAD_MAGIC_OFFSET..RPC_HEAD_TOTAL_SIZE_OFFSET]);

        let mut total_size = [0u8; 4];
        total_size.copy_from_slice(&head[RPC_HEAD_TOTAL_SIZE_OFFSET..RPC_HEAD_META_SIZE_OFFSET]);

        let mut meta_size = [0u8; 4];
        meta_size.copy_from_slice(&head[RPC_HEAD_META_SIZE_OFFSET..RPC_HEAD_SIZE]);

        Ok(Self {
            magic_code,
            total_size: i32::from_be_bytes(total_size),
            meta_size: i32::from_be_bytes(meta_size),
        })
    }
}
