#![allow(dead_code)]

use std::sync::Once;

use hpackwire_core::{HeaderField, HpackDecoder, HpackError};

static INIT_LOGGING: Once = Once::new();

pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .with_ansi(false)
            .try_init();
    });
}

pub fn field(name: &str, value: &str) -> HeaderField {
    HeaderField::new(name.as_bytes(), value.as_bytes())
}

pub fn decode_hex(decoder: &mut HpackDecoder, block: &str) -> Result<Vec<HeaderField>, HpackError> {
    let bytes = hex::decode(block.replace(' ', "")).expect("fixture is valid hex");
    let mut headers = Vec::new();
    decoder.decode(&bytes, true, &mut headers)?;
    Ok(headers)
}

/// Dynamic table contents, newest first, as `(name, value)` strings.
pub fn table_entries(decoder: &HpackDecoder) -> Vec<(String, String)> {
    decoder
        .dynamic_table()
        .iter()
        .map(|entry| {
            (
                String::from_utf8_lossy(entry.name).into_owned(),
                String::from_utf8_lossy(entry.value).into_owned(),
            )
        })
        .collect()
}
