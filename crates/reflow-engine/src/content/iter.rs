use crate::content::document::{FlowDocument, NodeId};
use crate::content::element::ContentElement;
use crate::content::error::ContentError;

/// A cursor over one node's children.
///
/// The cursor is a plain index into the parent's child list, evaluated
/// against the document on every call. That makes mutation during
/// traversal a supported, specified behavior rather than an invalidation
/// hazard: children appended while the cursor is still in range are
/// visited by the same cursor, and a cursor that ran off the end becomes
/// live again if the child list grows past it. There is no snapshot
/// isolation.
///
/// The usual loop shape:
///
/// ```rust
/// # use reflow_engine::content::FlowDocument;
/// # let mut doc = FlowDocument::new();
/// # doc.add_paragraph_text(doc.body(), "one").unwrap();
/// let mut itr = doc.iter_children(doc.body());
/// while itr.has_next(&doc) {
///     let element = itr.current(&doc).unwrap();
///     // inspect or mutate, then
///     itr.advance();
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentNodeIterator {
    node: NodeId,
    index: usize,
}

impl ContentNodeIterator {
    pub(crate) fn new(node: NodeId) -> Self {
        Self { node, index: 0 }
    }

    /// Whether an element is currently under the cursor. Pure peek.
    pub fn has_next(&self, doc: &FlowDocument) -> bool {
        self.index < doc.children(self.node).len()
    }

    /// The element under the cursor.
    ///
    /// Errors with [`ContentError::IteratorExhausted`] when the cursor has
    /// run past the end of the child list.
    pub fn current(&self, doc: &FlowDocument) -> Result<ContentElement, ContentError> {
        doc.children(self.node)
            .get(self.index)
            .and_then(|&child| doc.element(child))
            .ok_or(ContentError::IteratorExhausted)
    }

    /// Move the cursor one position forward.
    pub fn advance(&mut self) {
        self.index += 1;
    }
}
