/// Grammar mode of a [`Parser`](super::Parser).
///
/// Dialects share every production; they differ only in what they permit.
pub trait Dialect {
    fn name(&self) -> &'static str;

    /// Whether `<%@ ... %>` blocks are accepted without a diagnostic.
    fn import_blocks_permitted(&self) -> bool {
        false
    }
}

/// The strict dialect. Import blocks are parsed but diagnosed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Standard;

impl Dialect for Standard {
    fn name(&self) -> &'static str {
        "standard"
    }
}

/// The permissive dialect, accepting import blocks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Extended;

impl Dialect for Extended {
    fn name(&self) -> &'static str {
        "extended"
    }

    fn import_blocks_permitted(&self) -> bool {
        true
    }
}
