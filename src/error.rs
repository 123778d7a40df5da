/// Errors returned by insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// The key is absent and no vacant slot or tombstone was reachable
    /// within one full wrap of the table.
    TableFull,
    /// The key has no bytes before the first NUL; it would be
    /// indistinguishable from a never-used slot.
    EmptyKey,
}

impl std::fmt::Display for InsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TableFull => f.write_str("probe table has no reusable slot"),
            Self::EmptyKey => f.write_str("empty keys cannot be stored"),
        }
    }
}

impl std::error::Error for InsertError {}
