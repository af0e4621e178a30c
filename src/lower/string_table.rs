/// Opaque handle to an interned string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrId(pub usize);

impl std::fmt::Display for StrId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "str#{}", self.0)
    }
}

/// The interned string table for one compilation session.
///
/// Handles are a monotonically increasing counter starting at 0 and are
/// never reused; the table only grows. Interning the same text twice yields
/// two distinct handles: every `pushs` gets its own entry.
#[derive(Debug, Default)]
pub struct StringTable {
    strings: Vec<String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self {
            strings: Vec::new(),
        }
    }

    pub fn intern(&mut self, text: impl Into<String>) -> StrId {
        let id = StrId(self.strings.len());
        self.strings.push(text.into());
        id
    }

    pub fn get(&self, id: StrId) -> Option<&str> {
        self.strings.get(id.0).map(String::as_str)
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
