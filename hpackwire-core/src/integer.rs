use crate::error::HpackError;

/// Largest value accepted from the wire, matching a signed 32-bit length.
pub const MAX_INTEGER: usize = i32::MAX as usize;

/// Resumable decoder for the RFC 7541 section 5.1 prefix integer.
///
/// ```text
/// decode I from the next N bits
/// if I < 2^N - 1, return I
/// else
///     M = 0
///     repeat
///         B = next octet
///         I = I + (B & 127) * 2^M
///         M = M + 7
///     while B & 128 == 128
///     return I
/// ```
///
/// One instance lives for the whole connection and is restarted with
/// [`IntegerDecoder::begin_decode`] for every integer.
#[derive(Debug, Default, Clone)]
pub struct IntegerDecoder {
    value: usize,
    shift: u32,
}

impl IntegerDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a decode from the low `prefix_bits` of `byte`. Returns `true`
    /// when the prefix alone holds the value.
    pub fn begin_decode(&mut self, byte: u8, prefix_bits: u8) -> bool {
        debug_assert!((1..=8).contains(&prefix_bits));
        let mask = prefix_mask(prefix_bits);
        self.value = (byte & mask) as usize;
        self.shift = 0;
        self.value != mask as usize
    }

    /// Folds in one continuation octet. Returns `Ok(true)` once the octet
    /// without the continuation bit has been consumed.
    pub fn decode(&mut self, byte: u8) -> Result<bool, HpackError> {
        // 2^31 - 1 needs at most 31 bits beyond the prefix: five octets.
        if self.shift > 28 {
            return Err(HpackError::IntegerTooBig);
        }
        let value = self.value as u64 + ((u64::from(byte & 0x7f)) << self.shift);
        if value > MAX_INTEGER as u64 {
            return Err(HpackError::IntegerTooBig);
        }
        self.value = value as usize;
        self.shift += 7;
        Ok(byte & 0x80 == 0)
    }

    pub fn value(&self) -> usize {
        self.value
    }
}

fn prefix_mask(prefix_bits: u8) -> u8 {
    if prefix_bits >= 8 {
        0xff
    } else {
        (1u8 << prefix_bits) - 1
    }
}
