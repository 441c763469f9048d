use crate::{
    constants::{DEFAULT_MAX_PACKAGE_SIZE, RPC_HEAD_SIZE},
    package::{PackageDecodeError, RpcDataPackage, RpcHeadMeta},
};
use std::collections::VecDeque;

/// Cuts packages out of a continuous byte stream.
///
/// Bytes may arrive in arbitrary fragments. Each package is emitted as soon
/// as its head and the `total_size` bytes it announces are buffered.
///
/// A head announcing a negative or oversized package cannot be resynchronized
/// from, so the error is reported and everything buffered is dropped.
pub struct RpcPackageStreamDecoder {
    buffer: Vec<u8>, // Holds partial package data
    max_package_size: usize,
}

pub struct RpcPackageIterator {
    queue: VecDeque<Result<RpcDataPackage, PackageDecodeError>>,
}

impl Iterator for RpcPackageIterator {
    type Item = Result<RpcDataPackage, PackageDecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front()
    }
}

impl Default for RpcPackageStreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcPackageStreamDecoder {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            max_package_size: DEFAULT_MAX_PACKAGE_SIZE,
        }
    }

    /// Limits the size of a single package, head included.
    pub fn with_max_package_size(mut self, max_package_size: usize) -> Self {
        self.max_package_size = max_package_size;
        self
    }

    /// Number of bytes waiting for the rest of their package.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    // Reads new bytes and attempts to decode them into packages
    pub fn read_bytes(&mut self, data: &[u8]) -> RpcPackageIterator {
        self.buffer.extend_from_slice(data);
        let mut queue = VecDeque::new();

        while self.buffer.len() >= RPC_HEAD_SIZE {
            let head = match RpcHeadMeta::decode(&self.buffer) {
                Ok(head) => head,
                Err(e) => {
                    queue.push_back(Err(e));
                    break;
                }
            };

            let total = match usize::try_from(head.total_size) {
                Ok(n) => RPC_HEAD_SIZE + n,
                Err(_) => {
                    self.discard_buffer(&mut queue, PackageDecodeError::NegativeSize {
                        field: "total_size",
                        value: head.total_size,
                    });
                    break;
                }
            };

            if total > self.max_package_size {
                self.discard_buffer(&mut queue, PackageDecodeError::PackageTooLarge {
                    size: total,
                    max: self.max_package_size,
                });
                break;
            }

            if self.buffer.len() < total {
                break;
            }

            let result = RpcDataPackage::decode(&self.buffer[..total]);
            self.buffer.drain(..total);

            if let Err(e) = &result {
                tracing::warn!("Dropping undecodable package of {} bytes: {}", total, e);
            }

            queue.push_back(result);
        }

        RpcPackageIterator { queue }
    }

    fn discard_buffer(
        &mut self,
        queue: &mut VecDeque<Result<RpcDataPackage, PackageDecodeError>>,
        err: PackageDecodeError,
    ) {
        tracing::warn!(
            "Discarding {} buffered bytes after bad head: {}",
            self.buffer.len(),
            err
        );
        self.buffer.clear();
        queue.push_back(Err(err));
    }
}
