use reflow_engine::content::document::NodeId;
use reflow_engine::content::{
    ContentElement, ContentError, FlowDocument, HorizontalAlignment, Justification, ListId,
    ParagraphId, ResolvedTextStyle, TableCellId, TableId, TextStyle,
};
use reflow_engine::geometry::PageSetup;
use thiserror::Error;

use crate::page::{Page, PagedDocument, PlacedLine};

/// Baseline advance as a multiple of the font size.
const LINE_FACTOR: f64 = 1.2;
/// Average glyph width as a multiple of the font size.
const CHAR_WIDTH_FACTOR: f64 = 0.5;
/// Horizontal indent per nesting level, in points.
const INDENT_STEP: f64 = 18.0;
/// Separator between table columns in the line-metric model.
const COLUMN_SEPARATOR: &str = " | ";

#[derive(Debug, Error)]
pub enum LayoutError {
    /// Margins consume the entire page; no content area remains.
    #[error("page content area is empty: margins consume the whole page")]
    EmptyContentArea,

    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Paginate a finished tree using the document's own page defaults.
///
/// Consumes the document: pagination is the terminal phase, and a
/// paginated tree can no longer be mutated.
pub fn paginate(doc: FlowDocument) -> Result<PagedDocument, LayoutError> {
    let setup = *doc.page_defaults();
    paginate_with(doc, setup)
}

/// Paginate a finished tree with an explicit page setup.
pub fn paginate_with(doc: FlowDocument, setup: PageSetup) -> Result<PagedDocument, LayoutError> {
    if setup.content_width() <= 0.0 || setup.content_height() <= 0.0 {
        return Err(LayoutError::EmptyContentArea);
    }
    let mut paginator = Paginator {
        doc: &doc,
        setup,
        pages: Vec::new(),
        lines: Vec::new(),
        cursor_y: 0.0,
    };
    let mut no_label = None;
    paginator.layout_children(doc.body().into(), 0.0, &mut no_label)?;
    Ok(paginator.finish())
}

/// Walks the content tree and places lines onto fixed pages using a
/// coarse character-metric model: glyphs are `0.5 × font size` wide and
/// lines advance by `1.2 × font size`. Real shaping and rasterization
/// stay out of scope; the model only has to be deterministic.
struct Paginator<'a> {
    doc: &'a FlowDocument,
    setup: PageSetup,
    pages: Vec<Page>,
    lines: Vec<PlacedLine>,
    cursor_y: f64,
}

impl Paginator<'_> {
    fn layout_children(
        &mut self,
        node: NodeId,
        indent: f64,
        pending_label: &mut Option<String>,
    ) -> Result<(), LayoutError> {
        for child in self.doc.children(node).to_vec() {
            match self.doc.element(child) {
                Some(ContentElement::Paragraph(para)) => {
                    self.layout_paragraph(para, indent, pending_label)?;
                }
                Some(ContentElement::List(list)) => {
                    self.layout_list(list, indent)?;
                }
                Some(ContentElement::Table(table)) => {
                    self.layout_table(table, indent)?;
                }
                // Items and rows are laid out by their list/table parent;
                // runs by their paragraph. Nothing else reaches here.
                _ => {}
            }
        }
        Ok(())
    }

    fn layout_list(&mut self, list: ListId, indent: f64) -> Result<(), LayoutError> {
        for child in self.doc.children(list).to_vec() {
            let Some(item) = self.doc.element(child).and_then(|el| el.as_list_item()) else {
                continue;
            };
            let mut pending = Some(self.doc.item_label(item));
            self.layout_children(item.into(), indent + INDENT_STEP, &mut pending)?;
            if let Some(label) = pending.take() {
                // An item with no paragraph of its own still shows its label.
                self.place_line(indent + INDENT_STEP, label, TextStyle::new().resolve());
            }
        }
        Ok(())
    }

    fn layout_paragraph(
        &mut self,
        para: ParagraphId,
        indent: f64,
        pending_label: &mut Option<String>,
    ) -> Result<(), LayoutError> {
        let style = self.doc.resolved_paragraph_style(para);
        let attrs = self.doc.paragraph(para);
        let space_before = attrs.space_before();
        let space_after = attrs.space_after();
        let start_indent = attrs.start_indent();
        let end_indent = attrs.end_indent();
        let justification = attrs.justification();
        let tab_stops = attrs.tab_stops().to_vec();

        let char_width = style.font_size * CHAR_WIDTH_FACTOR;
        let left = indent + start_indent;
        let available = (self.setup.content_width() - left - end_indent).max(char_width);
        let budget = ((available / char_width).floor() as usize).max(1);

        let mut text = String::new();
        for child in self.doc.children(para) {
            if let Some(run) = self.doc.element(*child).and_then(|el| el.as_text_run()) {
                text.push_str(self.doc.text_run(run).text());
            }
        }
        if let Some(label) = pending_label.take() {
            text = if text.is_empty() {
                label
            } else {
                format!("{label} {text}")
            };
        }

        self.cursor_y += space_before;

        for (chunk_index, chunk) in text.split('\u{000C}').enumerate() {
            if chunk_index > 0 {
                // Form feed forces a page break.
                self.break_page();
            }
            let mut segments: Vec<&str> = chunk.split('\n').collect();
            if segments.last() == Some(&"") {
                segments.pop(); // a trailing newline ends the last line, it adds none
            }
            for segment in segments {
                let expanded = expand_tabs(segment, &tab_stops, char_width);
                for line in wrap(&expanded, budget) {
                    let shift = justification_shift(&line, budget, char_width, justification);
                    self.place_line(left + shift, line, style.clone());
                }
            }
        }

        self.cursor_y += space_after;
        Ok(())
    }

    fn layout_table(&mut self, table: TableId, indent: f64) -> Result<(), LayoutError> {
        let column_chars = ((self.doc.table(table).default_column_width()
            / (reflow_engine::content::style::DEFAULT_FONT_SIZE * CHAR_WIDTH_FACTOR))
            .floor() as usize)
            .max(1);
        let default_row_height = self.doc.table(table).default_row_height();
        let style = TextStyle::new().resolve();

        for row_node in self.doc.children(table).to_vec() {
            let row = self
                .doc
                .element(row_node)
                .ok_or(ContentError::DetachedNode)?
                .expect_table_row()?;
            let row_height = self
                .doc
                .table_row(row)
                .row_height()
                .unwrap_or(default_row_height);

            // One text block per anchored cell: width in characters,
            // alignment, and the flattened content lines.
            let mut blocks = Vec::new();
            for cell_node in self.doc.children(row).to_vec() {
                let cell = self
                    .doc
                    .element(cell_node)
                    .ok_or(ContentError::DetachedNode)?
                    .expect_table_cell()?;
                let span = self.doc.table_cell(cell).col_span() as usize;
                let width = column_chars * span + COLUMN_SEPARATOR.len() * (span - 1);
                let alignment = self.doc.table_cell(cell).horizontal_alignment();
                blocks.push((width, alignment, self.flatten_cell(cell)));
            }

            let line_count = blocks
                .iter()
                .map(|(_, _, lines)| lines.len())
                .max()
                .unwrap_or(0)
                .max(1);

            let start_y = self.cursor_y;
            let pages_before = self.pages.len();
            let empty = String::new();
            for i in 0..line_count {
                let mut text = String::new();
                for (block_index, (width, alignment, cell_lines)) in blocks.iter().enumerate() {
                    if block_index > 0 {
                        text.push_str(COLUMN_SEPARATOR);
                    }
                    let cell_line = cell_lines.get(i).unwrap_or(&empty);
                    text.push_str(&pad_cell(cell_line, *width, *alignment));
                }
                self.place_line(indent, text.trim_end().to_string(), style.clone());
            }
            // A configured row height is a minimum advance, not a clip.
            if self.pages.len() == pages_before && self.cursor_y - start_y < row_height {
                self.cursor_y = start_y + row_height;
            }
        }
        Ok(())
    }

    /// Flatten a cell's content to plain text lines: paragraphs become
    /// lines, nested lists keep their labels, nested tables render row by
    /// row with column separators.
    fn flatten_cell(&self, cell: TableCellId) -> Vec<String> {
        let mut out = Vec::new();
        self.flatten_container(cell.into(), None, &mut out);
        out
    }

    fn flatten_container(&self, node: NodeId, label: Option<String>, out: &mut Vec<String>) {
        let mut pending = label;
        for &child in self.doc.children(node) {
            match self.doc.element(child) {
                Some(ContentElement::Paragraph(para)) => {
                    let mut text = String::new();
                    for &run_node in self.doc.children(para) {
                        if let Some(run) =
                            self.doc.element(run_node).and_then(|el| el.as_text_run())
                        {
                            text.push_str(self.doc.text_run(run).text());
                        }
                    }
                    let mut segments: Vec<&str> = text.split('\n').collect();
                    if segments.last() == Some(&"") {
                        segments.pop();
                    }
                    for segment in segments {
                        match pending.take() {
                            Some(label) => out.push(format!("{label} {segment}")),
                            None => out.push(segment.to_string()),
                        }
                    }
                }
                Some(ContentElement::List(list)) => {
                    for &item_node in self.doc.children(list) {
                        if let Some(item) =
                            self.doc.element(item_node).and_then(|el| el.as_list_item())
                        {
                            self.flatten_container(
                                item.into(),
                                Some(self.doc.item_label(item)),
                                out,
                            );
                        }
                    }
                }
                Some(ContentElement::Table(nested)) => {
                    for &row_node in self.doc.children(nested) {
                        let mut columns = Vec::new();
                        for &cell_node in self.doc.children(row_node) {
                            if let Some(cell) =
                                self.doc.element(cell_node).and_then(|el| el.as_table_cell())
                            {
                                columns.push(self.flatten_cell(cell).join(" "));
                            }
                        }
                        out.push(columns.join(COLUMN_SEPARATOR));
                    }
                }
                _ => {}
            }
        }
        if let Some(label) = pending {
            out.push(label);
        }
    }

    fn place_line(&mut self, indent: f64, text: String, style: ResolvedTextStyle) {
        let line_height = style.font_size * LINE_FACTOR;
        if !self.lines.is_empty() && self.cursor_y + line_height > self.setup.content_height() {
            self.break_page();
        }
        self.cursor_y += line_height;
        self.lines.push(PlacedLine {
            y: self.cursor_y,
            indent,
            text,
            style,
        });
    }

    fn break_page(&mut self) {
        self.pages.push(Page {
            size: self.setup.size,
            margins: self.setup.margins,
            lines: std::mem::take(&mut self.lines),
        });
        self.cursor_y = 0.0;
    }

    fn finish(mut self) -> PagedDocument {
        if !self.lines.is_empty() || self.pages.is_empty() {
            self.break_page();
        }
        PagedDocument { pages: self.pages }
    }
}

/// Indent shift that realizes the paragraph's justification in the
/// character-metric model.
fn justification_shift(
    line: &str,
    budget: usize,
    char_width: f64,
    justification: Justification,
) -> f64 {
    if line.is_empty() {
        return 0.0;
    }
    let chars = line.chars().count();
    let slack = budget.saturating_sub(chars) as f64 * char_width;
    match justification {
        Justification::Left => 0.0,
        Justification::Right => slack,
        Justification::Center => slack / 2.0,
    }
}

/// Replace tabs with spaces up to the next configured tab stop; a tab
/// past the last stop collapses to a single space.
fn expand_tabs(line: &str, tab_stops: &[f64], char_width: f64) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let mut out = String::new();
    for (i, segment) in line.split('\t').enumerate() {
        if i > 0 {
            let column = out.chars().count();
            let next_stop = tab_stops
                .iter()
                .map(|stop| (stop / char_width).round() as usize)
                .find(|&stop_column| stop_column > column);
            match next_stop {
                Some(stop_column) => out.push_str(&" ".repeat(stop_column - column)),
                None => out.push(' '),
            }
        }
        out.push_str(segment);
    }
    out
}

/// Greedy word wrap to a character budget; words longer than the budget
/// are split hard.
fn wrap(text: &str, budget: usize) -> Vec<String> {
    if text.chars().count() <= budget {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut rest = text;
    while rest.chars().count() > budget {
        let head: String = rest.chars().take(budget + 1).collect();
        match head.rfind(' ') {
            Some(space) if space > 0 => {
                lines.push(rest[..space].to_string());
                rest = rest[space + 1..].trim_start_matches(' ');
            }
            _ => {
                let split = rest
                    .char_indices()
                    .nth(budget)
                    .map(|(byte, _)| byte)
                    .unwrap_or(rest.len());
                lines.push(rest[..split].to_string());
                rest = &rest[split..];
            }
        }
    }
    lines.push(rest.to_string());
    lines
}

/// Pad or clip a cell line to its column width, honoring the cell's
/// horizontal alignment.
fn pad_cell(text: &str, width: usize, alignment: HorizontalAlignment) -> String {
    let chars = text.chars().count();
    if chars >= width {
        return text.chars().take(width).collect();
    }
    let slack = width - chars;
    match alignment {
        HorizontalAlignment::Left => format!("{text}{}", " ".repeat(slack)),
        HorizontalAlignment::Right => format!("{}{text}", " ".repeat(slack)),
        HorizontalAlignment::Middle => {
            let before = slack / 2;
            format!("{}{text}{}", " ".repeat(before), " ".repeat(slack - before))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reflow_engine::content::NumberFormat;
    use reflow_engine::geometry::{Margins, PageSize};

    fn small_page() -> PageSetup {
        PageSetup {
            size: PageSize {
                width: 200.0,
                height: 120.0,
            },
            margins: Margins::uniform(10.0),
        }
    }

    // ============ Wrapping and tabs ============

    #[test]
    fn wrap_prefers_word_boundaries() {
        assert_eq!(wrap("lorem ipsum dolor", 11), vec!["lorem ipsum", "dolor"]);
        assert_eq!(wrap("short", 11), vec!["short"]);
    }

    #[test]
    fn wrap_hard_splits_oversized_words() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn tabs_advance_to_the_next_stop() {
        // 10pt font, 5pt chars: stops at 50pt and 100pt are columns 10 and 20.
        let expanded = expand_tabs("ab\tcd\tef", &[50.0, 100.0], 5.0);
        assert_eq!(expanded, format!("ab{}cd{}ef", " ".repeat(8), " ".repeat(8)));
    }

    #[test]
    fn tab_past_the_last_stop_is_a_single_space() {
        assert_eq!(expand_tabs("a\tb", &[], 5.0), "a b");
    }

    // ============ Page filling ============

    #[test]
    fn content_flows_onto_fresh_pages_when_full() {
        let mut doc = FlowDocument::new();
        // 100pt of content height fits eight 12pt lines per page.
        for i in 0..20 {
            doc.add_paragraph_text(doc.body(), &format!("line {i}")).unwrap();
        }

        let paged = paginate_with(doc, small_page()).unwrap();
        assert_eq!(paged.page_count(), 3);
        assert_eq!(paged.pages[0].line_count(), 8);
        assert_eq!(paged.pages[1].line_count(), 8);
        assert_eq!(paged.pages[2].line_count(), 4);
        assert_eq!(paged.line_count(), 20);
    }

    #[test]
    fn form_feed_forces_a_page_break() {
        let mut doc = FlowDocument::new();
        doc.add_paragraph_text(doc.body(), "one").unwrap();
        doc.add_paragraph_text(doc.body(), "\u{000C}").unwrap();
        doc.add_paragraph_text(doc.body(), "two").unwrap();

        let paged = paginate_with(doc, small_page()).unwrap();
        assert_eq!(paged.page_count(), 2);
        assert_eq!(paged.pages[0].lines[0].text, "one");
        assert_eq!(paged.pages[1].lines[0].text, "two");
    }

    #[test]
    fn empty_content_area_is_rejected() {
        let doc = FlowDocument::new();
        let setup = PageSetup {
            size: PageSize {
                width: 100.0,
                height: 100.0,
            },
            margins: Margins::uniform(50.0),
        };
        assert!(matches!(
            paginate_with(doc, setup),
            Err(LayoutError::EmptyContentArea)
        ));
    }

    #[test]
    fn an_empty_document_still_produces_one_page() {
        let paged = paginate(FlowDocument::new()).unwrap();
        assert_eq!(paged.page_count(), 1);
        assert_eq!(paged.pages[0].line_count(), 0);
    }

    // ============ Paragraph attributes ============

    #[test]
    fn spacing_and_indents_move_lines() {
        let mut doc = FlowDocument::new();
        let para = doc.add_paragraph_text(doc.body(), "spaced").unwrap();
        doc.paragraph_mut(para).set_space_before(20.0);
        doc.paragraph_mut(para).set_start_indent(20.0);

        let paged = paginate_with(doc, small_page()).unwrap();
        let line = &paged.pages[0].lines[0];
        assert_eq!(line.indent, 20.0);
        assert_eq!(line.y, 32.0); // 20pt space before + one 12pt line
    }

    #[test]
    fn right_justified_lines_shift_to_the_margin() {
        let mut doc = FlowDocument::new();
        let para = doc.add_paragraph_text(doc.body(), "end").unwrap();
        doc.paragraph_mut(para)
            .set_justification(Justification::Right);

        let paged = paginate_with(doc, small_page()).unwrap();
        // 180pt wide, 5pt chars: 36-char budget, 3 used, 33 of slack.
        assert_eq!(paged.pages[0].lines[0].indent, 33.0 * 5.0);
    }

    // ============ Lists and tables ============

    #[test]
    fn list_items_are_labelled_and_indented() {
        let mut doc = FlowDocument::new();
        let list = doc.add_list(doc.body()).unwrap();
        doc.list_mut(list).set_number_format(NumberFormat::UpperLetter);
        doc.list_mut(list).set_start_index(4);
        for text in ["first", "second"] {
            let item = doc.add_item(list).unwrap();
            doc.add_paragraph_text(item, text).unwrap();
        }

        let paged = paginate_with(doc, small_page()).unwrap();
        let lines = &paged.pages[0].lines;
        assert_eq!(lines[0].text, "D. first");
        assert_eq!(lines[1].text, "E. second");
        assert_eq!(lines[0].indent, INDENT_STEP);
    }

    #[test]
    fn table_rows_render_cells_in_columns() {
        let mut doc = FlowDocument::new();
        let table = doc.add_table(doc.body()).unwrap();
        doc.table_mut(table).set_default_column_width(50.0);
        for r in 0..2 {
            let row = doc.add_row(table).unwrap();
            for c in 0..2 {
                let cell = doc.add_cell(row).unwrap();
                doc.add_paragraph_text(cell, &format!("{r}/{c}")).unwrap();
            }
        }

        let paged = paginate_with(doc, small_page()).unwrap();
        let lines = &paged.pages[0].lines;
        // 50pt columns at 5pt default chars: 10-char cells, right-trimmed.
        assert_eq!(lines[0].text, format!("0/0{} | 0/1", " ".repeat(7)));
        assert_eq!(lines[1].text, format!("1/0{} | 1/1", " ".repeat(7)));
    }

    #[test]
    fn merged_cells_span_their_columns() {
        let mut doc = FlowDocument::new();
        let table = doc.add_table(doc.body()).unwrap();
        doc.table_mut(table).set_default_column_width(50.0);
        let row = doc.add_row(table).unwrap();
        for c in 0..3 {
            let cell = doc.add_cell(row).unwrap();
            doc.add_paragraph_text(cell, &format!("c{c}")).unwrap();
        }
        let merged = doc.cell_at(table, 0, 0).unwrap();
        doc.merge_right(merged, 1).unwrap();

        let paged = paginate_with(doc, small_page()).unwrap();
        // The merged block is two 10-char columns plus the separator
        // width; the absorbed cell's paragraph became its second line.
        let lines = &paged.pages[0].lines;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, format!("c0{} | c2", " ".repeat(21)));
        assert_eq!(lines[1].text, "c1");
    }

    #[test]
    fn configured_row_height_is_a_minimum_advance() {
        let mut doc = FlowDocument::new();
        let table = doc.add_table(doc.body()).unwrap();
        let row = doc.add_row(table).unwrap();
        doc.table_row_mut(row).set_row_height(40.0);
        let cell = doc.add_cell(row).unwrap();
        doc.add_paragraph_text(cell, "tall").unwrap();
        doc.add_paragraph_text(doc.body(), "after").unwrap();

        let paged = paginate_with(doc, small_page()).unwrap();
        let lines = &paged.pages[0].lines;
        assert_eq!(lines[0].y, 12.0);
        assert_eq!(lines[1].y, 52.0); // row reserved 40pt before the paragraph
    }
}
