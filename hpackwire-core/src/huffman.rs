use std::fmt;

use hpack::huffman::HuffmanDecoder;

use crate::error::HpackError;

/// Adapter over the `hpack` crate's canonical Huffman table (RFC 7541
/// Appendix B). One per decoder so the lookup table is built once per
/// connection.
pub(crate) struct Huffman {
    inner: HuffmanDecoder,
}

impl Huffman {
    pub(crate) fn new() -> Self {
        Self {
            inner: HuffmanDecoder::new(),
        }
    }

    /// Decodes `src` into `dst`, replacing its contents. Output longer than
    /// `max` is rejected.
    pub(crate) fn decode_into(
        &mut self,
        src: &[u8],
        dst: &mut Vec<u8>,
        max: usize,
    ) -> Result<(), HpackError> {
        let decoded = self
            .inner
            .decode(src)
            .map_err(|err| HpackError::Huffman(format!("{err:?}")))?;
        if decoded.len() > max {
            return Err(HpackError::StringTooLong {
                length: decoded.len(),
                max,
            });
        }
        dst.clear();
        dst.extend_from_slice(&decoded);
        Ok(())
    }
}

impl fmt::Debug for Huffman {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Huffman").finish_non_exhaustive()
    }
}
