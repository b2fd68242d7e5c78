use thiserror::Error;

/// Failure while decoding a header block.
///
/// Every variant is a COMPRESSION_ERROR at the HTTP/2 layer: the decoding
/// context is shared by the whole connection, so the caller tears the
/// connection down instead of retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HpackError {
    #[error("malformed HPACK instruction octet {0:#04x}")]
    MalformedInstruction(u8),
    #[error("HPACK index {0} is outside the static and dynamic tables")]
    IndexOutOfRange(usize),
    #[error("HPACK integer exceeds the maximum representable value")]
    IntegerTooBig,
    #[error("header entry of {size} bytes exceeds dynamic table capacity {max_size}")]
    EntryTooLarge { size: usize, max_size: usize },
    #[error("header string length {length} exceeds limit {max}")]
    StringTooLong { length: usize, max: usize },
    #[error("invalid huffman-encoded string: {0}")]
    Huffman(String),
    #[error("dynamic table size update to {size} exceeds the advertised limit {max}")]
    TableSizeUpdateTooLarge { size: usize, max: usize },
    #[error("header block ended in the middle of a header field")]
    IncompleteHeaderBlock,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read decoder config: {0}")]
    Read(String),
    #[error("failed to parse decoder config: {0}")]
    Parse(String),
    #[error("failed to serialize decoder config: {0}")]
    Serialize(String),
    #[error("failed to write decoder config: {0}")]
    Write(String),
    #[error("invalid decoder config: {0}")]
    Invalid(String),
}
