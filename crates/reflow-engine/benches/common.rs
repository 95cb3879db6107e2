use reflow_engine::content::{FlowDocument, NumberFormat};

/// Build a document with `blocks` top-level blocks: styled paragraphs with
/// three runs each, and a five-item numbered list every tenth block.
pub fn build_document(blocks: usize) -> FlowDocument {
    let mut doc = FlowDocument::new();
    for i in 0..blocks {
        if i % 10 == 9 {
            let list = doc.add_list(doc.body()).unwrap();
            doc.list_mut(list).set_number_format(NumberFormat::LowerRoman);
            for j in 0..5 {
                let item = doc.add_item(list).unwrap();
                doc.add_paragraph_text(item, &format!("list {i} item {j}"))
                    .unwrap();
            }
        } else {
            let para = doc.add_paragraph(doc.body()).unwrap();
            doc.paragraph_mut(para)
                .style_mut()
                .set_font_size(8.0 + (i % 7) as f64);
            doc.add_text(para, "lorem ipsum dolor sit amet, ").unwrap();
            doc.add_text(para, "consectetur adipisicing elit, ").unwrap();
            doc.add_text(para, "sed do eiusmod tempor incididunt").unwrap();
        }
    }
    doc
}
