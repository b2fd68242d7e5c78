use crate::error::HpackError;
use crate::types::{ENTRY_OVERHEAD, HeaderField, HeaderRef, entry_size};

/// Size-bounded FIFO of recently indexed header fields (RFC 7541 section 2.3.2).
///
/// Entries live in a ring buffer. `insert_index` is the next free slot and
/// `remove_index` the oldest live entry, so eviction never shifts anything.
/// Lookups count from the newest entry: index 0 is the last insert.
#[derive(Debug, Clone)]
pub struct DynamicTable {
    buffer: Vec<Option<HeaderField>>,
    max_size: usize,
    size: usize,
    count: usize,
    insert_index: usize,
    remove_index: usize,
}

impl DynamicTable {
    pub fn new(max_size: usize) -> Self {
        Self {
            buffer: empty_slots(slot_count(max_size)),
            max_size,
            size: 0,
            count: 0,
            insert_index: 0,
            remove_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Bytes charged against the budget by live entries.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn get(&self, index: usize) -> Option<HeaderRef<'_>> {
        if index >= self.count {
            return None;
        }
        let slot = (self.insert_index + self.buffer.len() - index - 1) % self.buffer.len();
        self.buffer[slot].as_ref().map(HeaderField::as_header_ref)
    }

    /// Live entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = HeaderRef<'_>> + '_ {
        (0..self.count).filter_map(move |index| self.get(index))
    }

    /// Adds an entry, evicting the oldest ones until it fits.
    ///
    /// An entry larger than the whole budget leaves the table empty and is
    /// reported as [`HpackError::EntryTooLarge`].
    pub fn insert(&mut self, name: &[u8], value: &[u8]) -> Result<(), HpackError> {
        let size = entry_size(name.len(), value.len());
        self.ensure_size(self.max_size.saturating_sub(size));
        if size > self.max_size {
            return Err(HpackError::EntryTooLarge {
                size,
                max_size: self.max_size,
            });
        }

        debug_assert!(self.count < self.buffer.len(), "slot count bounds the entry count");
        self.buffer[self.insert_index] = Some(HeaderField::new(name, value));
        self.insert_index = (self.insert_index + 1) % self.buffer.len();
        self.size += size;
        self.count += 1;
        tracing::trace!(size, table_size = self.size, entries = self.count, "hpack entry inserted");
        Ok(())
    }

    /// Changes the byte budget and evicts down to it. Zero is legal and
    /// empties the table.
    pub fn resize(&mut self, max_size: usize) {
        let slots = slot_count(max_size);
        if slots > self.buffer.len() {
            self.reallocate(slots);
        }
        self.max_size = max_size;
        self.ensure_size(max_size);
    }

    /// Evicts oldest entries until `size <= target`.
    pub fn ensure_size(&mut self, target: usize) {
        while self.count > 0 && self.size > target {
            if let Some(evicted) = self.buffer[self.remove_index].take() {
                self.size -= evicted.size();
                tracing::trace!(size = evicted.size(), table_size = self.size, "hpack entry evicted");
            }
            self.count -= 1;
            self.remove_index = (self.remove_index + 1) % self.buffer.len();
        }
    }

    fn reallocate(&mut self, slots: usize) {
        let mut buffer = empty_slots(slots);
        let old_len = self.buffer.len();
        for (position, slot) in buffer.iter_mut().take(self.count).enumerate() {
            *slot = self.buffer[(self.remove_index + position) % old_len].take();
        }
        self.buffer = buffer;
        self.remove_index = 0;
        self.insert_index = self.count % slots;
    }
}

impl Default for DynamicTable {
    fn default() -> Self {
        Self::new(4096)
    }
}

// Every entry costs at least the fixed overhead, so this bounds the count.
fn slot_count(max_size: usize) -> usize {
    max_size / ENTRY_OVERHEAD
}

fn empty_slots(slots: usize) -> Vec<Option<HeaderField>> {
    let mut buffer = Vec::with_capacity(slots);
    buffer.resize_with(slots, || None);
    buffer
}
