use crate::content::document::NodeId;
use crate::content::error::ContentError;
use crate::content::list::{ListId, ListItemId};
use crate::content::paragraph::{ParagraphId, TextRunId};
use crate::content::table::{TableCellId, TableId, TableRowId};

/// A tagged reference to one element of the content tree.
///
/// The sum is closed over exactly seven kinds; for any element exactly one
/// of the `as_*` queries succeeds and the other six return `None`. Every
/// composite kind (everything except [`TextRun`](ContentElement::TextRun))
/// is also a content node and answers [`as_node`](ContentElement::as_node).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentElement {
    TextRun(TextRunId),
    Paragraph(ParagraphId),
    List(ListId),
    ListItem(ListItemId),
    Table(TableId),
    TableRow(TableRowId),
    TableCell(TableCellId),
}

impl ContentElement {
    /// Human-readable kind name, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ContentElement::TextRun(_) => "text run",
            ContentElement::Paragraph(_) => "paragraph",
            ContentElement::List(_) => "list",
            ContentElement::ListItem(_) => "list item",
            ContentElement::Table(_) => "table",
            ContentElement::TableRow(_) => "table row",
            ContentElement::TableCell(_) => "table cell",
        }
    }

    /// The underlying arena handle, whatever the kind.
    pub fn node_id(&self) -> NodeId {
        match *self {
            ContentElement::TextRun(id) => id.into(),
            ContentElement::Paragraph(id) => id.into(),
            ContentElement::List(id) => id.into(),
            ContentElement::ListItem(id) => id.into(),
            ContentElement::Table(id) => id.into(),
            ContentElement::TableRow(id) => id.into(),
            ContentElement::TableCell(id) => id.into(),
        }
    }

    /// `Some` for every composite kind, `None` for text runs.
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            ContentElement::TextRun(_) => None,
            _ => Some(self.node_id()),
        }
    }

    pub fn as_text_run(&self) -> Option<TextRunId> {
        match *self {
            ContentElement::TextRun(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_paragraph(&self) -> Option<ParagraphId> {
        match *self {
            ContentElement::Paragraph(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<ListId> {
        match *self {
            ContentElement::List(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_list_item(&self) -> Option<ListItemId> {
        match *self {
            ContentElement::ListItem(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<TableId> {
        match *self {
            ContentElement::Table(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_table_row(&self) -> Option<TableRowId> {
        match *self {
            ContentElement::TableRow(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_table_cell(&self) -> Option<TableCellId> {
        match *self {
            ContentElement::TableCell(id) => Some(id),
            _ => None,
        }
    }

    /// Checked downcast to a table row, for callers that treat anything
    /// else as a malformed table.
    pub fn expect_table_row(&self) -> Result<TableRowId, ContentError> {
        self.as_table_row().ok_or(ContentError::WrongKind {
            expected: "table row",
            found: self.kind_name(),
        })
    }

    /// Checked downcast to a table cell.
    pub fn expect_table_cell(&self) -> Result<TableCellId, ContentError> {
        self.as_table_cell().ok_or(ContentError::WrongKind {
            expected: "table cell",
            found: self.kind_name(),
        })
    }
}
