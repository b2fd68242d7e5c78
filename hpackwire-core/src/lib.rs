mod config;
#[cfg(test)]
mod config_test;
mod decoder;
mod dynamic_table;
mod error;
mod huffman;
mod integer;
mod sink;
mod static_table;
#[cfg(test)]
mod test_support;
mod types;

pub use config::{DEFAULT_HEADER_TABLE_SIZE, DEFAULT_MAX_HEADER_FIELD_SIZE, DecoderConfig};
pub use decoder::HpackDecoder;
pub use dynamic_table::DynamicTable;
pub use error::{ConfigError, HpackError};
pub use integer::{IntegerDecoder, MAX_INTEGER};
pub use sink::HeaderSink;
pub use static_table::StaticTable;
pub use types::{ENTRY_OVERHEAD, HeaderField, HeaderRef, Representation, entry_size};
