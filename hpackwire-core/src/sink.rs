use crate::static_table::StaticTable;
use crate::types::HeaderField;

/// Receiver for decoded header fields, in wire order.
pub trait HeaderSink {
    fn on_header(&mut self, name: &[u8], value: &[u8]);

    /// A field taken whole from the static table. Consumers that key known
    /// headers by static index can override this and skip the name compare.
    fn on_static_indexed_header(&mut self, index: usize) {
        if let Some(entry) = StaticTable::get(index) {
            self.on_header(entry.name, entry.value);
        }
    }

    /// A literal marked never-indexed. A forwarding proxy must re-encode it
    /// the same way; everyone else can treat it as a plain header.
    fn on_never_indexed_header(&mut self, name: &[u8], value: &[u8]) {
        self.on_header(name, value);
    }
}

impl HeaderSink for Vec<HeaderField> {
    fn on_header(&mut self, name: &[u8], value: &[u8]) {
        self.push(HeaderField::new(name, value));
    }
}
