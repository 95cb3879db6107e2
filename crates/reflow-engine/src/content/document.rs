use crate::content::element::ContentElement;
use crate::content::error::ContentError;
use crate::content::iter::ContentNodeIterator;
use crate::content::list::{List, ListId, ListItem, ListItemId};
use crate::content::paragraph::{Paragraph, ParagraphId, TextRun, TextRunId};
use crate::content::table::{Table, TableCell, TableCellId, TableId, TableRow, TableRowId};
use crate::geometry::{Margins, PageSetup, PageSize};

/// Stable handle to a node in a [`FlowDocument`] arena.
///
/// Handles are plain indices: `Copy`, cheap to pass around, and valid for
/// the lifetime of the document they came from. Using a handle with a
/// different document is a logic error and may panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

/// Handle to the document body, the root container of the content tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub(crate) NodeId);

impl From<BodyId> for NodeId {
    fn from(id: BodyId) -> NodeId {
        id.0
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::BodyId {}
    impl Sealed for super::ListItemId {}
    impl Sealed for super::TableCellId {}
}

/// Nodes that can host block content: the body, list items, and table cells.
///
/// Paragraphs host only text runs, lists host only items, and tables host
/// only rows, so those appends go through dedicated methods instead.
pub trait Container: sealed::Sealed + Copy + Into<NodeId> {}

impl Container for BodyId {}
impl Container for ListItemId {}
impl Container for TableCellId {}

/// Per-kind payload stored in an arena slot.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ElementData {
    Body,
    TextRun(TextRun),
    Paragraph(Paragraph),
    List(List),
    ListItem(ListItem),
    Table(Table),
    TableRow(TableRow),
    TableCell(TableCell),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Slot {
    pub(crate) data: ElementData,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) detached: bool,
}

/// A flow document under construction.
///
/// The document owns every node in a single arena; parents hold ordered
/// child handles. Content is appended through `add_*` factories, mutated
/// through the typed accessors (`paragraph_mut`, `list_mut`, ...), and
/// traversed with [`ContentNodeIterator`] cursors. When the tree is
/// finished it is handed wholesale to the paginator, which consumes the
/// document by value.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowDocument {
    slots: Vec<Slot>,
    body: NodeId,
    page_defaults: PageSetup,
    /// The list that owns the most recently appended item, if its numbering
    /// run has not been interrupted since.
    active_list: Option<NodeId>,
}

impl FlowDocument {
    pub fn new() -> Self {
        let body = Slot {
            data: ElementData::Body,
            children: Vec::new(),
            parent: None,
            detached: false,
        };
        Self {
            slots: vec![body],
            body: NodeId(0),
            page_defaults: PageSetup::default(),
            active_list: None,
        }
    }

    /// The root container every top-level element hangs off.
    pub fn body(&self) -> BodyId {
        BodyId(self.body)
    }

    /// Page dimensions the paginator uses unless the caller overrides them.
    pub fn set_default_page_size(&mut self, width: f64, height: f64) {
        self.page_defaults.size = PageSize { width, height };
    }

    /// Page margins the paginator uses unless the caller overrides them.
    pub fn set_default_margins(&mut self, left: f64, top: f64, right: f64, bottom: f64) {
        self.page_defaults.margins = Margins {
            left,
            top,
            right,
            bottom,
        };
    }

    pub fn page_defaults(&self) -> &PageSetup {
        &self.page_defaults
    }

    /// Total number of nodes in the arena, the body included.
    pub fn node_count(&self) -> usize {
        self.slots.len()
    }

    /// Ordered child handles of a node. Detached nodes report no children.
    pub fn children(&self, node: impl Into<NodeId>) -> &[NodeId] {
        &self.slot(node.into()).children
    }

    pub fn parent(&self, node: impl Into<NodeId>) -> Option<NodeId> {
        self.slot(node.into()).parent
    }

    /// The element stored at `node`, or `None` for the body root.
    pub fn element(&self, node: NodeId) -> Option<ContentElement> {
        match &self.slot(node).data {
            ElementData::Body => None,
            ElementData::TextRun(_) => Some(ContentElement::TextRun(TextRunId(node))),
            ElementData::Paragraph(_) => Some(ContentElement::Paragraph(ParagraphId(node))),
            ElementData::List(_) => Some(ContentElement::List(ListId(node))),
            ElementData::ListItem(_) => Some(ContentElement::ListItem(ListItemId(node))),
            ElementData::Table(_) => Some(ContentElement::Table(TableId(node))),
            ElementData::TableRow(_) => Some(ContentElement::TableRow(TableRowId(node))),
            ElementData::TableCell(_) => Some(ContentElement::TableCell(TableCellId(node))),
        }
    }

    /// Whether the node was removed from the tree (e.g. absorbed by a merge).
    pub fn is_detached(&self, node: impl Into<NodeId>) -> bool {
        self.slot(node.into()).detached
    }

    /// Nesting depth of a node, with the body at level 0: a top-level list
    /// sits at level 1, its items at level 2, and so on.
    pub fn indentation_level(&self, node: impl Into<NodeId>) -> Result<usize, ContentError> {
        let mut level = 0;
        let mut cur = node.into();
        while cur != self.body {
            match self.slot(cur).parent {
                Some(parent) => {
                    level += 1;
                    cur = parent;
                }
                None => return Err(ContentError::DetachedNode),
            }
        }
        Ok(level)
    }

    /// A fresh cursor over the node's children, positioned on the first one.
    pub fn iter_children(&self, node: impl Into<NodeId>) -> ContentNodeIterator {
        ContentNodeIterator::new(node.into())
    }

    /// Append an empty paragraph to a container.
    pub fn add_paragraph(&mut self, parent: impl Container) -> Result<ParagraphId, ContentError> {
        let id = self.alloc(parent.into(), ElementData::Paragraph(Paragraph::default()))?;
        Ok(ParagraphId(id))
    }

    /// Append a paragraph already holding one text run.
    pub fn add_paragraph_text(
        &mut self,
        parent: impl Container,
        text: &str,
    ) -> Result<ParagraphId, ContentError> {
        let para = self.add_paragraph(parent)?;
        self.add_text(para, text)?;
        Ok(para)
    }

    /// Append an empty list to a container.
    pub fn add_list(&mut self, parent: impl Container) -> Result<ListId, ContentError> {
        let id = self.alloc(parent.into(), ElementData::List(List::default()))?;
        Ok(ListId(id))
    }

    /// Append an empty table to a container.
    pub fn add_table(&mut self, parent: impl Container) -> Result<TableId, ContentError> {
        let id = self.alloc(parent.into(), ElementData::Table(Table::default()))?;
        Ok(TableId(id))
    }

    // ---- crate-internal arena machinery ----

    pub(crate) fn slot(&self, node: NodeId) -> &Slot {
        &self.slots[node.0 as usize]
    }

    pub(crate) fn slot_mut(&mut self, node: NodeId) -> &mut Slot {
        &mut self.slots[node.0 as usize]
    }

    pub(crate) fn ensure_attached(&self, node: NodeId) -> Result<(), ContentError> {
        if self.slot(node).detached {
            Err(ContentError::DetachedNode)
        } else {
            Ok(())
        }
    }

    /// Append a new node under `parent` and return its handle.
    ///
    /// Non-list content interrupts the numbering run of the active list
    /// unless it lands inside that list's own subtree.
    pub(crate) fn alloc(
        &mut self,
        parent: NodeId,
        data: ElementData,
    ) -> Result<NodeId, ContentError> {
        self.ensure_attached(parent)?;
        let interrupts = !matches!(data, ElementData::List(_) | ElementData::ListItem(_));
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Slot {
            data,
            children: Vec::new(),
            parent: Some(parent),
            detached: false,
        });
        self.slots[parent.0 as usize].children.push(id);
        if interrupts {
            self.interrupt_active_list(id);
        }
        Ok(id)
    }

    pub(crate) fn set_active_list(&mut self, list: NodeId) {
        self.active_list = Some(list);
    }

    pub(crate) fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.slots[id.0 as usize].parent;
        }
        false
    }

    /// Remove a node from its parent's child list and mark it detached.
    pub(crate) fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.slots[node.0 as usize].parent {
            self.slots[parent.0 as usize]
                .children
                .retain(|&child| child != node);
        }
        let slot = &mut self.slots[node.0 as usize];
        slot.parent = None;
        slot.detached = true;
    }

    /// Move every child of `from` to the end of `to`'s child list.
    pub(crate) fn reparent_children(&mut self, from: NodeId, to: NodeId) {
        let moved = std::mem::take(&mut self.slots[from.0 as usize].children);
        for &child in &moved {
            self.slots[child.0 as usize].parent = Some(to);
        }
        self.slots[to.0 as usize].children.extend(moved);
    }

    /// Break the active list's numbering run if the appended node is
    /// outside its subtree.
    fn interrupt_active_list(&mut self, appended: NodeId) {
        let Some(active) = self.active_list else {
            return;
        };
        if self.is_descendant_of(appended, active) {
            return;
        }
        if let ElementData::List(list) = &mut self.slots[active.0 as usize].data {
            list.mark_run_broken();
        }
        self.active_list = None;
    }
}

impl Default for FlowDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============ Basic construction ============

    #[test]
    fn new_document_has_empty_body() {
        let doc = FlowDocument::new();
        assert!(doc.children(doc.body()).is_empty());
        assert_eq!(doc.node_count(), 1);
    }

    #[test]
    fn children_preserve_insertion_order() {
        let mut doc = FlowDocument::new();
        let first = doc.add_paragraph(doc.body()).unwrap();
        let second = doc.add_list(doc.body()).unwrap();
        let third = doc.add_table(doc.body()).unwrap();

        let children = doc.children(doc.body());
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], first.into());
        assert_eq!(children[1], second.into());
        assert_eq!(children[2], third.into());
    }

    #[test]
    fn body_is_not_an_element() {
        let doc = FlowDocument::new();
        assert_eq!(doc.element(doc.body().into()), None);
    }

    #[test]
    fn page_defaults_can_be_replaced() {
        let mut doc = FlowDocument::new();
        doc.set_default_page_size(650.0, 750.0);
        doc.set_default_margins(72.0, 72.0, 144.0, 228.0);

        let setup = doc.page_defaults();
        assert_eq!(setup.size.width, 650.0);
        assert_eq!(setup.size.height, 750.0);
        assert_eq!(setup.margins.right, 144.0);
        assert_eq!(setup.margins.bottom, 228.0);
    }

    // ============ Nesting depth ============

    #[test]
    fn indentation_level_counts_containers_from_body() {
        let mut doc = FlowDocument::new();
        let list = doc.add_list(doc.body()).unwrap();
        let item = doc.add_item(list).unwrap();
        let nested = doc.add_list(item).unwrap();
        let nested_item = doc.add_item(nested).unwrap();

        assert_eq!(doc.indentation_level(doc.body()).unwrap(), 0);
        assert_eq!(doc.indentation_level(list).unwrap(), 1);
        assert_eq!(doc.indentation_level(item).unwrap(), 2);
        assert_eq!(doc.indentation_level(nested).unwrap(), 3);
        assert_eq!(doc.indentation_level(nested_item).unwrap(), 4);
    }
}
