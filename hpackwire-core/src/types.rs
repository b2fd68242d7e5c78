/// Per-entry overhead RFC 7541 section 4.1 charges against the table budget.
pub const ENTRY_OVERHEAD: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub name: Vec<u8>,
    pub value: Vec<u8>,
}

impl HeaderField {
    pub fn new(name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn size(&self) -> usize {
        entry_size(self.name.len(), self.value.len())
    }

    pub fn as_header_ref(&self) -> HeaderRef<'_> {
        HeaderRef {
            name: &self.name,
            value: &self.value,
        }
    }
}

/// Borrowed view over an entry of either table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRef<'a> {
    pub name: &'a [u8],
    pub value: &'a [u8],
}

impl HeaderRef<'_> {
    pub fn size(&self) -> usize {
        entry_size(self.name.len(), self.value.len())
    }
}

/// How a literal field asked to be treated by the dynamic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    IncrementalIndexing,
    WithoutIndexing,
    NeverIndexed,
}

pub fn entry_size(name_len: usize, value_len: usize) -> usize {
    name_len + value_len + ENTRY_OVERHEAD
}
