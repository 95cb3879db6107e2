use serde::{Deserialize, Serialize};

use crate::content::document::{ElementData, FlowDocument, NodeId};
use crate::content::error::ContentError;
use crate::content::style::{Border, ResolvedTextStyle, TextStyle};

/// Handle to a paragraph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParagraphId(pub(crate) NodeId);

impl From<ParagraphId> for NodeId {
    fn from(id: ParagraphId) -> NodeId {
        id.0
    }
}

/// Handle to a text-run leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRunId(pub(crate) NodeId);

impl From<TextRunId> for NodeId {
    fn from(id: TextRunId) -> NodeId {
        id.0
    }
}

/// Horizontal justification of a paragraph's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Justification {
    #[default]
    Left,
    Right,
    Center,
}

/// Block-level attributes of a paragraph.
///
/// The paragraph's own [`TextStyle`] acts as the default for its runs:
/// a run that leaves a field unset inherits it from here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    style: TextStyle,
    space_before: f64,
    space_after: f64,
    start_indent: f64,
    end_indent: f64,
    justification: Justification,
    tab_stops: Vec<f64>,
    border: Option<Border>,
}

impl Paragraph {
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut TextStyle {
        &mut self.style
    }

    /// Vertical gap before the paragraph, in points.
    pub fn set_space_before(&mut self, points: f64) {
        self.space_before = points;
    }

    pub fn space_before(&self) -> f64 {
        self.space_before
    }

    pub fn set_space_after(&mut self, points: f64) {
        self.space_after = points;
    }

    pub fn space_after(&self) -> f64 {
        self.space_after
    }

    /// Extra indentation on the leading edge, in points.
    pub fn set_start_indent(&mut self, points: f64) {
        self.start_indent = points;
    }

    pub fn start_indent(&self) -> f64 {
        self.start_indent
    }

    pub fn set_end_indent(&mut self, points: f64) {
        self.end_indent = points;
    }

    pub fn end_indent(&self) -> f64 {
        self.end_indent
    }

    pub fn set_justification(&mut self, justification: Justification) {
        self.justification = justification;
    }

    pub fn justification(&self) -> Justification {
        self.justification
    }

    /// Register a tab stop at an absolute position in points. Stops are
    /// kept sorted; registering the same position twice is a no-op.
    pub fn add_tab_stop(&mut self, position: f64) {
        match self
            .tab_stops
            .binary_search_by(|stop| stop.total_cmp(&position))
        {
            Ok(_) => {}
            Err(at) => self.tab_stops.insert(at, position),
        }
    }

    pub fn tab_stops(&self) -> &[f64] {
        &self.tab_stops
    }

    pub fn set_border(&mut self, thickness: f64, r: u8, g: u8, b: u8) {
        self.border = Some(Border {
            thickness,
            color: crate::content::style::Rgb::new(r, g, b),
        });
    }

    pub fn border(&self) -> Option<Border> {
        self.border
    }
}

/// A leaf holding a piece of text and its style overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRun {
    text: String,
    style: TextStyle,
}

impl TextRun {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut TextStyle {
        &mut self.style
    }
}

impl FlowDocument {
    /// Append a text run to the end of a paragraph.
    pub fn add_text(
        &mut self,
        paragraph: ParagraphId,
        text: &str,
    ) -> Result<TextRunId, ContentError> {
        let id = self.alloc(paragraph.into(), ElementData::TextRun(TextRun::new(text)))?;
        Ok(TextRunId(id))
    }

    pub fn paragraph(&self, id: ParagraphId) -> &Paragraph {
        match &self.slot(id.into()).data {
            ElementData::Paragraph(para) => para,
            _ => unreachable!("paragraph handle refers to a non-paragraph node"),
        }
    }

    pub fn paragraph_mut(&mut self, id: ParagraphId) -> &mut Paragraph {
        match &mut self.slot_mut(id.into()).data {
            ElementData::Paragraph(para) => para,
            _ => unreachable!("paragraph handle refers to a non-paragraph node"),
        }
    }

    pub fn text_run(&self, id: TextRunId) -> &TextRun {
        match &self.slot(id.into()).data {
            ElementData::TextRun(run) => run,
            _ => unreachable!("text run handle refers to a non-run node"),
        }
    }

    pub fn text_run_mut(&mut self, id: TextRunId) -> &mut TextRun {
        match &mut self.slot_mut(id.into()).data {
            ElementData::TextRun(run) => run,
            _ => unreachable!("text run handle refers to a non-run node"),
        }
    }

    /// Paragraph style with every field made concrete.
    pub fn resolved_paragraph_style(&self, id: ParagraphId) -> ResolvedTextStyle {
        self.paragraph(id).style().resolve()
    }

    /// Effective style of a run: its own overrides, then its paragraph's
    /// style, then the engine defaults.
    pub fn resolved_run_style(&self, id: TextRunId) -> ResolvedTextStyle {
        let run_style = self.text_run(id).style();
        match self.parent(id).and_then(|p| self.element(p)) {
            Some(parent) => match parent.as_paragraph() {
                Some(para) => run_style.layered_over(self.paragraph(para).style()).resolve(),
                None => run_style.resolve(),
            },
            None => run_style.resolve(),
        }
    }
}
