use reflow_engine::content::ResolvedTextStyle;
use reflow_engine::geometry::{Margins, PageSize};
use serde::{Deserialize, Serialize};

/// One laid-out line of text on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLine {
    /// Baseline offset from the top margin, in points.
    pub y: f64,
    /// Offset from the left margin, in points.
    pub indent: f64,
    pub text: String,
    pub style: ResolvedTextStyle,
}

/// A single fixed page of the output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub size: PageSize,
    pub margins: Margins,
    pub lines: Vec<PlacedLine>,
}

impl Page {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// The paginator's output: an ordered sequence of fixed pages.
///
/// Once produced, the document is final; there is no partial or
/// incremental pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedDocument {
    pub pages: Vec<Page>,
}

impl PagedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(Page::line_count).sum()
    }
}
