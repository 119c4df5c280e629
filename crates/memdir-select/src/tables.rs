//! Readiness gating for asynchronously arriving reference tables.

/// One reference table, either still in flight or loaded.
///
/// `Pending` is distinct from an empty table: derived computations must
/// not run against a table that simply has not arrived yet. Loads are
/// fire-once; re-installing a ready table is ignored.
#[derive(Debug, Clone, Default)]
pub enum TableSlot<T> {
    #[default]
    Pending,
    Ready(Vec<T>),
}

impl<T> TableSlot<T> {
    /// Install the loaded rows. Returns `false` (and leaves the slot
    /// untouched) when the table was already installed.
    pub fn install(&mut self, rows: Vec<T>) -> bool {
        match self {
            Self::Pending => {
                *self = Self::Ready(rows);
                true
            }
            Self::Ready(_) => false,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The rows, or `None` while the load is still pending.
    pub fn rows(&self) -> Option<&[T]> {
        match self {
            Self::Pending => None,
            Self::Ready(rows) => Some(rows),
        }
    }
}
