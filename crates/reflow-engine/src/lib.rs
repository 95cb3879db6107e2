pub mod content;
pub mod geometry;

// Re-export key types for easier usage
pub use content::{
    Border, ContentElement, ContentError, ContentNodeIterator, FlowDocument, HorizontalAlignment,
    Justification, List, ListId, ListItem, ListItemId, NumberFormat, Paragraph, ParagraphId,
    ResolvedTextStyle, Rgb, Table, TableCell, TableCellId, TableId, TableRow, TableRowId, TextRun,
    TextRunId, TextStyle, VerticalAlignment,
    document::{BodyId, Container, NodeId},
};
pub use geometry::{Margins, PageSetup, PageSize};
