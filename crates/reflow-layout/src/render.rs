use crate::page::PagedDocument;

/// Character cell width used when projecting point offsets onto text
/// columns, matching the paginator's default glyph metrics.
const TEXT_COLUMN_WIDTH: f64 = 5.0;

/// Render a paged document as plain text: one banner per page, one text
/// line per placed line, indents projected onto columns. Deterministic,
/// which is what the CLI and the snapshot tests need.
pub fn render_text(doc: &PagedDocument) -> String {
    let mut out = String::new();
    for (index, page) in doc.pages.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "=== page {} ({:.0}x{:.0}) ===\n",
            index + 1,
            page.size.width,
            page.size.height
        ));
        for line in &page.lines {
            let columns = (line.indent / TEXT_COLUMN_WIDTH).round() as usize;
            out.push_str(&" ".repeat(columns));
            out.push_str(&line.text);
            out.push('\n');
        }
    }
    out
}
