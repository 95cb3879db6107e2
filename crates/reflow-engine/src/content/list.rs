use serde::{Deserialize, Serialize};

use crate::content::document::{ElementData, FlowDocument, NodeId};
use crate::content::error::ContentError;

/// Handle to a list node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(pub(crate) NodeId);

impl From<ListId> for NodeId {
    fn from(id: ListId) -> NodeId {
        id.0
    }
}

/// Handle to a list item node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListItemId(pub(crate) NodeId);

impl From<ListItemId> for NodeId {
    fn from(id: ListItemId) -> NodeId {
        id.0
    }
}

/// How list ordinals are rendered into labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberFormat {
    #[default]
    Decimal,
    LowerLetter,
    UpperLetter,
    LowerRoman,
    UpperRoman,
}

impl NumberFormat {
    /// Render an ordinal in this format. Letter and roman formats have no
    /// representation for zero and fall back to the decimal rendering.
    pub fn render(&self, ordinal: u32) -> String {
        match self {
            NumberFormat::Decimal => ordinal.to_string(),
            NumberFormat::LowerLetter => letters(ordinal),
            NumberFormat::UpperLetter => letters(ordinal).to_ascii_uppercase(),
            NumberFormat::LowerRoman => roman(ordinal),
            NumberFormat::UpperRoman => roman(ordinal).to_ascii_uppercase(),
        }
    }
}

/// Bijective base-26 letters: 1 -> a, 26 -> z, 27 -> aa.
fn letters(ordinal: u32) -> String {
    if ordinal == 0 {
        return "0".to_string();
    }
    let mut n = ordinal;
    let mut out = String::new();
    while n > 0 {
        n -= 1;
        out.insert(0, (b'a' + (n % 26) as u8) as char);
        n /= 26;
    }
    out
}

const ROMAN_VALUES: [(u32, &str); 13] = [
    (1000, "m"),
    (900, "cm"),
    (500, "d"),
    (400, "cd"),
    (100, "c"),
    (90, "xc"),
    (50, "l"),
    (40, "xl"),
    (10, "x"),
    (9, "ix"),
    (5, "v"),
    (4, "iv"),
    (1, "i"),
];

fn roman(ordinal: u32) -> String {
    if ordinal == 0 {
        return "0".to_string();
    }
    let mut n = ordinal;
    let mut out = String::new();
    for (value, numeral) in ROMAN_VALUES {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

/// A numbered list.
///
/// Numbering is parameterized by format, start index, suffix, and a
/// continues flag (pick up the ordinal sequence of a preceding sibling
/// list). Labels are assigned per numbering run: item `i` of a run that
/// starts at `s` is labelled `format(s + i)` plus the suffix.
///
/// A run is interrupted when non-list content lands in the flow after the
/// list's most recent item. The next item then starts a fresh run at the
/// start index — unless the caller resumes the old run first with
/// [`FlowDocument::continue_numbering`]. Resumption is always an explicit
/// policy decision, never inferred.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    format: NumberFormat,
    suffix: String,
    start: u32,
    continues: bool,
    /// Next ordinal of the current run.
    counter: u32,
    item_count: u32,
    run_broken: bool,
    resume_armed: bool,
}

impl Default for List {
    fn default() -> Self {
        Self {
            format: NumberFormat::Decimal,
            suffix: ".".to_string(),
            start: 1,
            continues: false,
            counter: 1,
            item_count: 0,
            run_broken: false,
            resume_armed: false,
        }
    }
}

impl List {
    pub fn set_number_format(&mut self, format: NumberFormat) {
        self.format = format;
    }

    /// Set format, label suffix, and the continues flag in one call.
    pub fn set_numbering(
        &mut self,
        format: NumberFormat,
        suffix: impl Into<String>,
        continues: bool,
    ) {
        self.format = format;
        self.suffix = suffix.into();
        self.continues = continues;
    }

    pub fn set_suffix(&mut self, suffix: impl Into<String>) {
        self.suffix = suffix.into();
    }

    /// Ordinal assigned to the first item of each fresh numbering run.
    /// Changing it on a list that already has items only affects future
    /// restarts.
    pub fn set_start_index(&mut self, start: u32) {
        self.start = start;
        if self.item_count == 0 {
            self.counter = start;
        }
    }

    pub fn format(&self) -> NumberFormat {
        self.format
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn start_index(&self) -> u32 {
        self.start
    }

    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Whether intervening content has interrupted the current run.
    pub fn is_run_broken(&self) -> bool {
        self.run_broken
    }

    pub(crate) fn mark_run_broken(&mut self) {
        if self.item_count > 0 {
            self.run_broken = true;
        }
    }
}

/// A single item of a list. The ordinal is fixed at creation time by the
/// owning list's numbering state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItem {
    ordinal: u32,
}

impl ListItem {
    pub(crate) fn new(ordinal: u32) -> Self {
        Self { ordinal }
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }
}

impl FlowDocument {
    pub fn list(&self, id: ListId) -> &List {
        match &self.slot(id.into()).data {
            ElementData::List(list) => list,
            _ => unreachable!("list handle refers to a non-list node"),
        }
    }

    pub fn list_mut(&mut self, id: ListId) -> &mut List {
        match &mut self.slot_mut(id.into()).data {
            ElementData::List(list) => list,
            _ => unreachable!("list handle refers to a non-list node"),
        }
    }

    pub fn list_item(&self, id: ListItemId) -> &ListItem {
        match &self.slot(id.into()).data {
            ElementData::ListItem(item) => item,
            _ => unreachable!("list item handle refers to a non-item node"),
        }
    }

    /// Append an item to a list and assign its label ordinal.
    pub fn add_item(&mut self, list: ListId) -> Result<ListItemId, ContentError> {
        self.ensure_attached(list.into())?;

        let ordinal = {
            let data = self.list(list);
            if data.item_count == 0 {
                if data.continues {
                    self.preceding_sibling_counter(list).unwrap_or(data.start)
                } else {
                    data.start
                }
            } else if data.run_broken && !data.resume_armed {
                data.start
            } else {
                data.counter
            }
        };

        let id = self.alloc(list.into(), ElementData::ListItem(ListItem::new(ordinal)))?;
        let data = self.list_mut(list);
        data.counter = ordinal + 1;
        data.item_count += 1;
        data.run_broken = false;
        data.resume_armed = false;
        self.set_active_list(list.into());
        Ok(ListItemId(id))
    }

    /// Append an item already holding one paragraph of text.
    pub fn add_item_text(
        &mut self,
        list: ListId,
        text: &str,
    ) -> Result<ListItemId, ContentError> {
        let item = self.add_item(list)?;
        self.add_paragraph_text(item, text)?;
        Ok(item)
    }

    /// Resume an interrupted numbering run: the next item continues where
    /// the run left off instead of restarting at the start index.
    ///
    /// Errors with [`ContentError::ContinuationWithoutBreak`] when the
    /// list's run is not interrupted (including a list with no items yet).
    pub fn continue_numbering(&mut self, list: ListId) -> Result<(), ContentError> {
        self.ensure_attached(list.into())?;
        let data = self.list_mut(list);
        if !data.run_broken {
            return Err(ContentError::ContinuationWithoutBreak);
        }
        data.resume_armed = true;
        Ok(())
    }

    /// The rendered label of an item: its ordinal in the owning list's
    /// format, followed by the list's suffix.
    pub fn item_label(&self, item: ListItemId) -> String {
        let ordinal = self.list_item(item).ordinal();
        match self
            .parent(item)
            .and_then(|parent| self.element(parent))
            .and_then(|el| el.as_list())
        {
            Some(list) => {
                let data = self.list(list);
                format!("{}{}", data.format().render(ordinal), data.suffix())
            }
            None => ordinal.to_string(),
        }
    }

    /// Counter of the closest preceding sibling list with at least one
    /// item, for lists created with the continues flag.
    fn preceding_sibling_counter(&self, list: ListId) -> Option<u32> {
        let parent = self.parent(list)?;
        let siblings = self.children(parent);
        let position = siblings.iter().position(|&c| c == list.into())?;
        siblings[..position].iter().rev().find_map(|&sibling| {
            let prior = self.element(sibling)?.as_list()?;
            let data = self.list(prior);
            (data.item_count > 0).then_some(data.counter)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // ============ Label formats ============

    #[rstest]
    #[case(NumberFormat::Decimal, 0, "0")]
    #[case(NumberFormat::Decimal, 7, "7")]
    #[case(NumberFormat::LowerLetter, 1, "a")]
    #[case(NumberFormat::LowerLetter, 26, "z")]
    #[case(NumberFormat::LowerLetter, 27, "aa")]
    #[case(NumberFormat::UpperLetter, 4, "D")]
    #[case(NumberFormat::UpperLetter, 8, "H")]
    #[case(NumberFormat::LowerRoman, 4, "iv")]
    #[case(NumberFormat::LowerRoman, 10, "x")]
    #[case(NumberFormat::UpperRoman, 7, "VII")]
    #[case(NumberFormat::UpperRoman, 1994, "MCMXCIV")]
    fn number_formats_render(
        #[case] format: NumberFormat,
        #[case] ordinal: u32,
        #[case] expected: &str,
    ) {
        assert_eq!(format.render(ordinal), expected);
    }

    #[rstest]
    #[case(NumberFormat::LowerLetter)]
    #[case(NumberFormat::UpperLetter)]
    #[case(NumberFormat::LowerRoman)]
    #[case(NumberFormat::UpperRoman)]
    fn zero_falls_back_to_decimal(#[case] format: NumberFormat) {
        assert_eq!(format.render(0), "0");
    }

    // ============ Sequential numbering ============

    #[test]
    fn upper_letter_list_from_four_labels_d_through_h() {
        let mut doc = FlowDocument::new();
        let list = doc.add_list(doc.body()).unwrap();
        doc.list_mut(list).set_number_format(NumberFormat::UpperLetter);
        doc.list_mut(list).set_start_index(4);

        let labels: Vec<String> = (0..5)
            .map(|_| {
                let item = doc.add_item(list).unwrap();
                doc.item_label(item)
            })
            .collect();

        assert_eq!(labels, vec!["D.", "E.", "F.", "G.", "H."]);
    }

    #[test]
    fn suffix_and_format_apply_together() {
        let mut doc = FlowDocument::new();
        let list = doc.add_list(doc.body()).unwrap();
        doc.list_mut(list)
            .set_numbering(NumberFormat::UpperRoman, ")", true);
        doc.list_mut(list).set_start_index(7);

        let item = doc.add_item(list).unwrap();
        assert_eq!(doc.item_label(item), "VII)");
    }

    #[test]
    fn content_inside_items_does_not_disturb_numbering() {
        let mut doc = FlowDocument::new();
        let list = doc.add_list(doc.body()).unwrap();

        let first = doc.add_item(list).unwrap();
        doc.add_paragraph_text(first, "item 0[0]").unwrap();
        doc.add_paragraph_text(first, "item 0[1]").unwrap();
        let second = doc.add_item(list).unwrap();

        assert_eq!(doc.item_label(second), "2.");
    }

    #[test]
    fn outer_list_items_do_not_break_a_nested_list() {
        let mut doc = FlowDocument::new();
        let outer = doc.add_list(doc.body()).unwrap();
        let holder = doc.add_item(outer).unwrap();
        let nested = doc.add_list(holder).unwrap();
        doc.list_mut(nested).set_start_index(0);

        doc.add_item(nested).unwrap();
        doc.add_item(nested).unwrap();
        // An item of the outer list is list content, not an interruption.
        doc.add_item(outer).unwrap();
        let third = doc.add_item(nested).unwrap();

        assert_eq!(doc.list_item(third).ordinal(), 2);
    }

    // ============ Interruption and continuation ============

    #[test]
    fn intervening_paragraph_restarts_numbering_by_default() {
        let mut doc = FlowDocument::new();
        let list = doc.add_list(doc.body()).unwrap();
        doc.list_mut(list).set_start_index(4);
        doc.add_item(list).unwrap();
        doc.add_item(list).unwrap();

        doc.add_paragraph_text(doc.body(), "splitting paragraph")
            .unwrap();
        assert!(doc.list(list).is_run_broken());

        let restarted = doc.add_item(list).unwrap();
        assert_eq!(doc.list_item(restarted).ordinal(), 4);
    }

    #[test]
    fn continue_numbering_resumes_where_the_run_left_off() {
        let mut doc = FlowDocument::new();
        let list = doc.add_list(doc.body()).unwrap();
        doc.list_mut(list).set_start_index(4);
        for _ in 0..3 {
            doc.add_item(list).unwrap();
        }

        doc.add_paragraph_text(doc.body(), "splitting paragraph")
            .unwrap();
        doc.continue_numbering(list).unwrap();

        let resumed = doc.add_item(list).unwrap();
        // Three items emitted before the break: next ordinal is 4 + 3.
        assert_eq!(doc.list_item(resumed).ordinal(), 7);
    }

    #[test]
    fn continue_numbering_without_a_break_is_an_error() {
        let mut doc = FlowDocument::new();
        let list = doc.add_list(doc.body()).unwrap();
        doc.add_item(list).unwrap();

        assert_eq!(
            doc.continue_numbering(list),
            Err(ContentError::ContinuationWithoutBreak)
        );
    }

    #[test]
    fn continue_numbering_on_an_empty_list_is_an_error() {
        let mut doc = FlowDocument::new();
        let list = doc.add_list(doc.body()).unwrap();
        doc.add_paragraph_text(doc.body(), "unrelated").unwrap();

        assert_eq!(
            doc.continue_numbering(list),
            Err(ContentError::ContinuationWithoutBreak)
        );
    }

    #[test]
    fn interruption_only_breaks_the_active_list() {
        let mut doc = FlowDocument::new();
        let outer = doc.add_list(doc.body()).unwrap();
        doc.list_mut(outer).set_number_format(NumberFormat::UpperLetter);
        doc.list_mut(outer).set_start_index(4);
        for _ in 0..4 {
            doc.add_item(outer).unwrap();
        }

        let holder = doc.add_item(outer).unwrap(); // "H." would be next run
        let nested = doc.add_list(holder).unwrap();
        doc.add_item(nested).unwrap();

        // The paragraph lands between the nested list's items, so only the
        // nested run breaks; the outer list keeps counting.
        doc.add_paragraph_text(doc.body(), "splitting paragraph")
            .unwrap();
        assert!(doc.list(nested).is_run_broken());
        assert!(!doc.list(outer).is_run_broken());

        let next_outer = doc.add_item(outer).unwrap();
        assert_eq!(doc.item_label(next_outer), "I.");
    }

    // ============ Sibling continuation flag ============

    #[test]
    fn continues_flag_picks_up_a_preceding_sibling_list() {
        let mut doc = FlowDocument::new();
        let first = doc.add_list(doc.body()).unwrap();
        doc.list_mut(first).set_start_index(4);
        doc.add_item(first).unwrap();
        doc.add_item(first).unwrap();

        doc.add_paragraph_text(doc.body(), "between the lists").unwrap();

        let second = doc.add_list(doc.body()).unwrap();
        doc.list_mut(second)
            .set_numbering(NumberFormat::Decimal, ".", true);
        let item = doc.add_item(second).unwrap();

        assert_eq!(doc.list_item(item).ordinal(), 6);
    }

    #[test]
    fn continues_flag_without_a_sibling_uses_the_start_index() {
        let mut doc = FlowDocument::new();
        let list = doc.add_list(doc.body()).unwrap();
        doc.list_mut(list)
            .set_numbering(NumberFormat::Decimal, ".", true);
        doc.list_mut(list).set_start_index(0);

        let item = doc.add_item(list).unwrap();
        assert_eq!(doc.item_label(item), "0.");
    }
}
