use crate::config::DecoderConfig;
use crate::dynamic_table::DynamicTable;
use crate::error::HpackError;
use crate::huffman::Huffman;
use crate::integer::IntegerDecoder;
use crate::sink::HeaderSink;
use crate::static_table::StaticTable;
use crate::types::{HeaderRef, Representation, entry_size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    HeaderFieldIndex,
    HeaderNameIndex,
    HeaderNameLength,
    HeaderNameLengthContinue,
    HeaderName,
    HeaderValueLength,
    HeaderValueLengthContinue,
    HeaderValue,
    DynamicTableSize,
}

/// Streaming HPACK decoder holding one connection's compression context.
///
/// Bytes may arrive split anywhere, including inside an integer or string;
/// the state machine picks up where the previous call stopped. Calls must be
/// made in wire order from a single task.
///
/// The first error poisons the decoder: the shared table can no longer be
/// trusted, so every later call returns the same error.
#[derive(Debug)]
pub struct HpackDecoder {
    dynamic_table: DynamicTable,
    integer: IntegerDecoder,
    huffman: Huffman,
    max_dynamic_table_size: usize,
    max_string_length: usize,
    strict_entry_size: bool,
    state: State,
    representation: Representation,
    huffman_flag: bool,
    string_length: usize,
    string_octets: Vec<u8>,
    header_name: Vec<u8>,
    header_value: Vec<u8>,
    headers_observed: bool,
    poisoned: Option<HpackError>,
}

impl Default for HpackDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl HpackDecoder {
    pub fn new() -> Self {
        Self::with_config(&DecoderConfig::default())
    }

    pub fn with_config(config: &DecoderConfig) -> Self {
        Self {
            dynamic_table: DynamicTable::new(config.header_table_size),
            integer: IntegerDecoder::new(),
            huffman: Huffman::new(),
            max_dynamic_table_size: config.header_table_size,
            max_string_length: config.max_header_field_size,
            strict_entry_size: config.strict_entry_size,
            state: State::Ready,
            representation: Representation::WithoutIndexing,
            huffman_flag: false,
            string_length: 0,
            string_octets: Vec::with_capacity(config.max_header_field_size),
            header_name: Vec::new(),
            header_value: Vec::new(),
            headers_observed: false,
            poisoned: None,
        }
    }

    pub fn dynamic_table(&self) -> &DynamicTable {
        &self.dynamic_table
    }

    /// Ceiling for dynamic table size updates, i.e. the
    /// SETTINGS_HEADER_TABLE_SIZE currently in force.
    pub fn max_dynamic_table_size(&self) -> usize {
        self.max_dynamic_table_size
    }

    /// Applies a new SETTINGS_HEADER_TABLE_SIZE. A table already larger than
    /// the new ceiling shrinks right away.
    pub fn set_max_dynamic_table_size(&mut self, size: usize) {
        self.max_dynamic_table_size = size;
        if self.dynamic_table.max_size() > size {
            self.dynamic_table.resize(size);
        }
        tracing::debug!(size, "hpack dynamic table ceiling changed");
    }

    /// Decodes one fragment of a header block. Pass `end_headers` with the
    /// fragment carrying END_HEADERS so a field cut off at the end of the
    /// block is reported.
    pub fn decode<S>(
        &mut self,
        data: &[u8],
        end_headers: bool,
        sink: &mut S,
    ) -> Result<(), HpackError>
    where
        S: HeaderSink + ?Sized,
    {
        if let Some(err) = &self.poisoned {
            return Err(err.clone());
        }
        self.decode_fragment(data, end_headers, sink).map_err(|err| self.poison(err))
    }

    /// Feeds a single octet.
    pub fn on_byte<S>(&mut self, byte: u8, sink: &mut S) -> Result<(), HpackError>
    where
        S: HeaderSink + ?Sized,
    {
        if let Some(err) = &self.poisoned {
            return Err(err.clone());
        }
        self.step(byte, sink).map_err(|err| self.poison(err))
    }

    /// Marks the end of a header block fed through [`HpackDecoder::on_byte`].
    /// Fails if the block stopped in the middle of a field; otherwise the
    /// next block may open with dynamic table size updates again.
    pub fn end_header_block(&mut self) -> Result<(), HpackError> {
        if let Some(err) = &self.poisoned {
            return Err(err.clone());
        }
        self.finish_block().map_err(|err| self.poison(err))
    }

    fn finish_block(&mut self) -> Result<(), HpackError> {
        if self.state != State::Ready {
            return Err(HpackError::IncompleteHeaderBlock);
        }
        self.headers_observed = false;
        Ok(())
    }

    fn poison(&mut self, err: HpackError) -> HpackError {
        tracing::debug!(error = %err, state = ?self.state, "hpack header block rejected");
        self.poisoned = Some(err.clone());
        err
    }

    fn decode_fragment<S>(
        &mut self,
        data: &[u8],
        end_headers: bool,
        sink: &mut S,
    ) -> Result<(), HpackError>
    where
        S: HeaderSink + ?Sized,
    {
        for &byte in data {
            self.step(byte, sink)?;
        }
        if end_headers {
            self.finish_block()?;
        }
        Ok(())
    }

    fn step<S>(&mut self, byte: u8, sink: &mut S) -> Result<(), HpackError>
    where
        S: HeaderSink + ?Sized,
    {
        match self.state {
            State::Ready => self.on_instruction(byte, sink),
            State::HeaderFieldIndex => {
                if self.integer.decode(byte)? {
                    self.emit_indexed(self.integer.value(), sink)?;
                }
                Ok(())
            }
            State::HeaderNameIndex => {
                if self.integer.decode(byte)? {
                    self.load_indexed_name(self.integer.value())?;
                }
                Ok(())
            }
            State::HeaderNameLength => {
                self.huffman_flag = byte & 0x80 != 0;
                if self.integer.begin_decode(byte, 7) {
                    self.begin_name(self.integer.value())
                } else {
                    self.state = State::HeaderNameLengthContinue;
                    Ok(())
                }
            }
            State::HeaderNameLengthContinue => {
                if self.integer.decode(byte)? {
                    self.begin_name(self.integer.value())?;
                }
                Ok(())
            }
            State::HeaderName => {
                self.string_octets.push(byte);
                if self.string_octets.len() == self.string_length {
                    self.finish_name()?;
                }
                Ok(())
            }
            State::HeaderValueLength => {
                self.huffman_flag = byte & 0x80 != 0;
                if self.integer.begin_decode(byte, 7) {
                    self.begin_value(self.integer.value(), sink)
                } else {
                    self.state = State::HeaderValueLengthContinue;
                    Ok(())
                }
            }
            State::HeaderValueLengthContinue => {
                if self.integer.decode(byte)? {
                    self.begin_value(self.integer.value(), sink)?;
                }
                Ok(())
            }
            State::HeaderValue => {
                self.string_octets.push(byte);
                if self.string_octets.len() == self.string_length {
                    self.finish_value(sink)?;
                }
                Ok(())
            }
            State::DynamicTableSize => {
                if self.integer.decode(byte)? {
                    self.apply_size_update(self.integer.value())?;
                }
                Ok(())
            }
        }
    }

    fn on_instruction<S>(&mut self, byte: u8, sink: &mut S) -> Result<(), HpackError>
    where
        S: HeaderSink + ?Sized,
    {
        match byte {
            // 1xxxxxxx: indexed header field
            0x80..=0xff => {
                self.headers_observed = true;
                if self.integer.begin_decode(byte, 7) {
                    if self.integer.value() == 0 {
                        return Err(HpackError::MalformedInstruction(byte));
                    }
                    self.emit_indexed(self.integer.value(), sink)?;
                } else {
                    self.state = State::HeaderFieldIndex;
                }
                Ok(())
            }
            // 01xxxxxx: literal with incremental indexing
            0x40..=0x7f => self.begin_literal(byte, Representation::IncrementalIndexing, 6),
            // 001xxxxx: dynamic table size update, only ahead of the first field
            0x20..=0x3f => {
                if self.headers_observed {
                    return Err(HpackError::MalformedInstruction(byte));
                }
                if self.integer.begin_decode(byte, 5) {
                    self.apply_size_update(self.integer.value())
                } else {
                    self.state = State::DynamicTableSize;
                    Ok(())
                }
            }
            // 0001xxxx: literal never indexed
            0x10..=0x1f => self.begin_literal(byte, Representation::NeverIndexed, 4),
            // 0000xxxx: literal without indexing
            0x00..=0x0f => self.begin_literal(byte, Representation::WithoutIndexing, 4),
        }
    }

    fn begin_literal(
        &mut self,
        byte: u8,
        representation: Representation,
        prefix_bits: u8,
    ) -> Result<(), HpackError> {
        self.representation = representation;
        self.headers_observed = true;
        if !self.integer.begin_decode(byte, prefix_bits) {
            self.state = State::HeaderNameIndex;
            return Ok(());
        }
        match self.integer.value() {
            0 => {
                self.state = State::HeaderNameLength;
                Ok(())
            }
            index => self.load_indexed_name(index),
        }
    }

    fn emit_indexed<S>(&mut self, index: usize, sink: &mut S) -> Result<(), HpackError>
    where
        S: HeaderSink + ?Sized,
    {
        if (1..=StaticTable::LEN).contains(&index) {
            sink.on_static_indexed_header(index);
        } else {
            let entry = lookup(&self.dynamic_table, index)?;
            sink.on_header(entry.name, entry.value);
        }
        self.state = State::Ready;
        Ok(())
    }

    fn load_indexed_name(&mut self, index: usize) -> Result<(), HpackError> {
        let entry = lookup(&self.dynamic_table, index)?;
        self.header_name.clear();
        self.header_name.extend_from_slice(entry.name);
        self.state = State::HeaderValueLength;
        Ok(())
    }

    fn begin_name(&mut self, length: usize) -> Result<(), HpackError> {
        self.begin_string(length)?;
        self.state = State::HeaderName;
        if length == 0 {
            self.finish_name()?;
        }
        Ok(())
    }

    fn begin_value<S>(&mut self, length: usize, sink: &mut S) -> Result<(), HpackError>
    where
        S: HeaderSink + ?Sized,
    {
        self.begin_string(length)?;
        self.state = State::HeaderValue;
        if length == 0 {
            self.finish_value(sink)?;
        }
        Ok(())
    }

    fn begin_string(&mut self, length: usize) -> Result<(), HpackError> {
        if length > self.max_string_length {
            return Err(HpackError::StringTooLong {
                length,
                max: self.max_string_length,
            });
        }
        self.string_length = length;
        self.string_octets.clear();
        Ok(())
    }

    fn finish_name(&mut self) -> Result<(), HpackError> {
        decode_string(
            &mut self.huffman,
            self.huffman_flag,
            &self.string_octets,
            &mut self.header_name,
            self.max_string_length,
        )?;
        self.state = State::HeaderValueLength;
        Ok(())
    }

    fn finish_value<S>(&mut self, sink: &mut S) -> Result<(), HpackError>
    where
        S: HeaderSink + ?Sized,
    {
        decode_string(
            &mut self.huffman,
            self.huffman_flag,
            &self.string_octets,
            &mut self.header_value,
            self.max_string_length,
        )?;
        self.state = State::Ready;

        match self.representation {
            Representation::NeverIndexed => {
                sink.on_never_indexed_header(&self.header_name, &self.header_value)
            }
            _ => sink.on_header(&self.header_name, &self.header_value),
        }

        if self.representation == Representation::IncrementalIndexing {
            self.index_field()?;
        }
        Ok(())
    }

    fn index_field(&mut self) -> Result<(), HpackError> {
        let size = entry_size(self.header_name.len(), self.header_value.len());
        if size > self.dynamic_table.max_size() && !self.strict_entry_size {
            // RFC 7541 section 4.4: an oversized entry empties the table.
            self.dynamic_table.ensure_size(0);
            return Ok(());
        }
        self.dynamic_table.insert(&self.header_name, &self.header_value)
    }

    fn apply_size_update(&mut self, size: usize) -> Result<(), HpackError> {
        if size > self.max_dynamic_table_size {
            return Err(HpackError::TableSizeUpdateTooLarge {
                size,
                max: self.max_dynamic_table_size,
            });
        }
        tracing::debug!(
            size,
            previous = self.dynamic_table.max_size(),
            "hpack dynamic table size update"
        );
        self.dynamic_table.resize(size);
        self.state = State::Ready;
        Ok(())
    }
}

/// Resolves a 1-based index over the static table followed by the dynamic
/// table.
fn lookup(dynamic_table: &DynamicTable, index: usize) -> Result<HeaderRef<'_>, HpackError> {
    let entry = if index <= StaticTable::LEN {
        StaticTable::get(index)
    } else {
        dynamic_table.get(index - StaticTable::LEN - 1)
    };
    entry.ok_or(HpackError::IndexOutOfRange(index))
}

fn decode_string(
    huffman: &mut Huffman,
    is_huffman: bool,
    src: &[u8],
    dst: &mut Vec<u8>,
    max: usize,
) -> Result<(), HpackError> {
    if is_huffman {
        return huffman.decode_into(src, dst, max);
    }
    dst.clear();
    dst.extend_from_slice(src);
    Ok(())
}
