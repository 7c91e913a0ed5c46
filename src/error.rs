use thiserror::Error;

/// Errors reported by cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BidiError {
    /// The cursor was moved past the first or the last entry.
    #[error("no such element")]
    NoSuchElement,
    /// The cursor has no current entry, either because it was never moved or
    /// because the entry was removed through it.
    #[error("cursor has no current entry")]
    IllegalState,
    /// The map was structurally modified after the cursor was created.
    #[error("map was modified outside of the cursor")]
    ConcurrentModification,
    /// The cursor was used with a map other than the one that created it.
    #[error("cursor belongs to another map")]
    ForeignMap,
}
