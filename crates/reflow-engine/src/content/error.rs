use thiserror::Error;

/// Errors surfaced by content-tree operations.
///
/// Every fallible operation on [`FlowDocument`](crate::content::FlowDocument)
/// returns one of these; nothing in the tree panics on bad coordinates or
/// stale handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContentError {
    /// A downcast-style operation required one element kind but found another.
    #[error("expected a {expected}, found a {found}")]
    WrongKind {
        expected: &'static str,
        found: &'static str,
    },

    /// `current()` was called on an iterator with no element under the cursor.
    #[error("content iterator is exhausted")]
    IteratorExhausted,

    /// A (row, column) coordinate fell outside the table's grid.
    #[error("cell ({row}, {col}) is outside the table grid")]
    CellOutOfRange { row: usize, col: usize },

    /// A merge would overlap a cell that is already part of a merge.
    #[error("merge overlaps an already-merged cell at ({row}, {col})")]
    MergeConflict { row: usize, col: usize },

    /// `continue_numbering` was called on a list whose numbering run is not
    /// interrupted.
    #[error("list numbering is not interrupted; nothing to continue")]
    ContinuationWithoutBreak,

    /// The node was detached from the tree (for example absorbed by a cell
    /// merge) and can no longer be used structurally.
    #[error("node is detached from the document tree")]
    DetachedNode,
}
