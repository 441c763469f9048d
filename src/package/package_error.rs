use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageEncodeError {
    /// The package has no head to write.
    MissingHead,

    /// The package has no meta to write.
    MissingMeta,

    /// Meta, data and attachment together do not fit the `i32` total size field.
    SizeOverflow { total_size: usize },
}

impl fmt::Display for PackageEncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageEncodeError::MissingHead => write!(f, "property 'head' is missing"),
            PackageEncodeError::MissingMeta => write!(f, "property 'rpc_meta' is missing"),
            PackageEncodeError::SizeOverflow { total_size } => {
                write!(f, "package body of {} bytes exceeds i32 range", total_size)
            }
        }
    }
}

impl std::error::Error for PackageEncodeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageDecodeError {
    /// Fewer than 12 bytes were available for the head.
    IncompleteHead { available: usize },

    /// The head declares more meta bytes than the buffer holds.
    IncompleteMeta { meta_size: usize, available: usize },

    /// The meta bytes are not a valid `RpcMeta`.
    CorruptMeta(prost::DecodeError),

    /// A declared size field is negative.
    NegativeSize { field: &'static str, value: i32 },

    /// `total_size - meta_size - attachment_size` is negative.
    NegativeDataSize {
        total_size: i32,
        meta_size: i32,
        attachment_size: i32,
    },

    /// Data or attachment extends past the end of the buffer.
    IncompletePayload { expected: usize, available: usize },

    /// A buffered package exceeds the stream decoder's size limit.
    PackageTooLarge { size: usize, max: usize },
}

impl fmt::Display for PackageDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageDecodeError::IncompleteHead { available } => {
                write!(f, "incomplete head: {} of 12 bytes available", available)
            }
            PackageDecodeError::IncompleteMeta {
                meta_size,
                available,
            } => write!(
                f,
                "incomplete meta: {} bytes declared, {} available",
                meta_size, available
            ),
            PackageDecodeError::CorruptMeta(e) => write!(f, "corrupt meta: {}", e),
            PackageDecodeError::NegativeSize { field, value } => {
                write!(f, "negative {}: {}", field, value)
            }
            PackageDecodeError::NegativeDataSize {
                total_size,
                meta_size,
                attachment_size,
            } => write!(
                f,
                "negative data size: total {} - meta {} - attachment {}",
                total_size, meta_size, attachment_size
            ),
            PackageDecodeError::IncompletePayload {
                expected,
                available,
            } => write!(
                f,
                "incomplete payload: {} bytes expected, {} available",
                expected, available
            ),
            PackageDecodeError::PackageTooLarge { size, max } => {
                write!(f, "package of {} bytes exceeds limit of {}", size, max)
            }
        }
    }
}

impl std::error::Error for PackageDecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PackageDecodeError::CorruptMeta(e) => Some(e),
            _ => None,
        }
    }
}

// Allows `?` on meta decoding
impl From<prost::DecodeError> for PackageDecodeError {
    fn from(err: prost::DecodeError) -> Self {
        PackageDecodeError::CorruptMeta(err)
    }
}
