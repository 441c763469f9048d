/// Compression tag carried in the meta. Only the tag travels with the
/// package; compressing the data itself happens elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum CompressType {
    NoCompress = 0,
    Snappy = 1,
    Gzip = 2,
}
