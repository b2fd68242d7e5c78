use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

pub(crate) fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .with_target(true)
            .with_ansi(false)
            .try_init();
    });
}

/// RFC 7541 section 5.1 integer with `pattern` in the bits above the prefix.
pub(crate) fn encode_integer(value: usize, prefix_bits: u8, pattern: u8) -> Vec<u8> {
    let max = (1usize << prefix_bits) - 1;
    if value < max {
        return vec![pattern | value as u8];
    }
    let mut out = vec![pattern | max as u8];
    let mut remaining = value - max;
    while remaining >= 128 {
        out.push(0x80 | (remaining & 0x7f) as u8);
        remaining >>= 7;
    }
    out.push(remaining as u8);
    out
}

pub(crate) fn encode_raw_string(value: &[u8]) -> Vec<u8> {
    let mut out = encode_integer(value.len(), 7, 0x00);
    out.extend_from_slice(value);
    out
}

pub(crate) fn literal_new_name(pattern: u8, name: &[u8], value: &[u8]) -> Vec<u8> {
    let mut out = vec![pattern];
    out.extend(encode_raw_string(name));
    out.extend(encode_raw_string(value));
    out
}

pub(crate) fn literal_indexed_name(
    pattern: u8,
    prefix_bits: u8,
    index: usize,
    value: &[u8],
) -> Vec<u8> {
    let mut out = encode_integer(index, prefix_bits, pattern);
    out.extend(encode_raw_string(value));
    out
}
