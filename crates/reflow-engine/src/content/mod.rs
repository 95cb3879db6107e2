/*!
 * # Content Tree Module
 *
 * This module implements the flow-document content tree: the mutable,
 * ordered model a caller builds up before handing it to the paginator in
 * `reflow-layout` for fixed-page output.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Arena, Stable Handles
 * - Every node lives in one arena owned by [`FlowDocument`]
 * - Parents hold ordered lists of child handles; children never outlive
 *   their document and are never shared between documents
 * - Handles ([`ParagraphId`], [`ListId`], [`TableCellId`], ...) are `Copy`
 *   and stay valid for the lifetime of the document; a handle into a
 *   subtree removed by a cell merge resolves to a detached-node error
 *   instead of dangling
 *
 * ### 2. Closed Element Sum
 * - [`ContentElement`] is a closed sum over the seven node kinds
 *   (text run, paragraph, list, list item, table, table row, table cell)
 * - Downcast queries (`as_paragraph`, `as_list`, ...) are total: for every
 *   element exactly one succeeds and the rest return `None`
 *
 * ### 3. Live Cursors
 * - [`ContentNodeIterator`] is an index into the parent's child list, not
 *   a snapshot; appending children mid-traversal extends the traversal
 *
 * ### 4. Explicit Numbering Policy
 * - List numbering runs break when non-list content interrupts the flow;
 *   resuming a broken run is an explicit caller decision
 *   ([`FlowDocument::continue_numbering`]), never inferred
 *
 * ## Usage Pattern
 *
 * ```rust
 * use reflow_engine::content::document::FlowDocument;
 * use reflow_engine::content::list::NumberFormat;
 *
 * let mut doc = FlowDocument::new();
 *
 * // Paragraphs hold styled text runs.
 * let para = doc.add_paragraph(doc.body()).unwrap();
 * doc.add_text(para, "Hello, flow documents").unwrap();
 *
 * // Lists number their items; letters, romans, decimals.
 * let list = doc.add_list(doc.body()).unwrap();
 * doc.list_mut(list).set_number_format(NumberFormat::UpperLetter);
 * doc.list_mut(list).set_start_index(4);
 * let item = doc.add_item(list).unwrap();
 * doc.add_paragraph_text(item, "first item").unwrap();
 * assert_eq!(doc.item_label(item), "D.");
 * ```
 *
 * Pagination consumes the document by value (`reflow-layout`), which makes
 * the build/paginate phase split a type-level fact: once paginated, the
 * tree can no longer be mutated.
 */

pub mod document;
pub mod element;
pub mod error;
pub mod iter;
pub mod list;
pub mod paragraph;
pub mod style;
pub mod table;

// Public API re-exports
pub use document::{BodyId, Container, FlowDocument, NodeId};
pub use element::ContentElement;
pub use error::ContentError;
pub use iter::ContentNodeIterator;
pub use list::{List, ListId, ListItem, ListItemId, NumberFormat};
pub use paragraph::{Justification, Paragraph, ParagraphId, TextRun, TextRunId};
pub use style::{Border, ResolvedTextStyle, Rgb, TextStyle};
pub use table::{
    HorizontalAlignment, Table, TableCell, TableCellId, TableId, TableRow, TableRowId,
    VerticalAlignment,
};
