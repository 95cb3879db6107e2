use anyhow::{Context, Result};
use reflow_config::Config;
use reflow_engine::content::{
    FlowDocument, HorizontalAlignment, Justification, NumberFormat, VerticalAlignment,
};
use reflow_layout::{paginate_with, write_text};
use relative_path::RelativePath;
use std::{env, path::PathBuf, process};

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipisicing elit, \
sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad \
minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea \
commodo consequat.";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::load()
        .context("failed to load configuration")?
        .unwrap_or_default();
    let output_root = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.output_path.clone());

    let mut doc = FlowDocument::new();
    doc.set_default_page_size(config.page_width, config.page_height);
    doc.set_default_margins(config.margin, config.margin, config.margin, config.margin);

    add_styled_paragraphs(&mut doc)?;
    add_numbered_lists(&mut doc)?;
    grow_lists_in_place(&mut doc)?;
    add_fact_table(&mut doc)?;

    let setup = *doc.page_defaults();
    let paged = paginate_with(doc, setup).context("pagination failed")?;
    let written = write_text(RelativePath::new("created_doc.txt"), &output_root, &paged)
        .context("failed to write rendered pages")?;

    println!(
        "wrote {} pages ({} lines) to {}",
        paged.page_count(),
        paged.line_count(),
        written.display()
    );
    Ok(())
}

/// Styled paragraphs: tab stops, per-run colors, a mid-build edit of an
/// earlier run through a live cursor.
fn add_styled_paragraphs(doc: &mut FlowDocument) -> Result<()> {
    let para = doc.add_paragraph(doc.body())?;
    doc.paragraph_mut(para).style_mut().set_font_size(24.0);
    doc.paragraph_mut(para).style_mut().set_text_color(255, 0, 0);
    doc.paragraph_mut(para).add_tab_stop(150.0);
    doc.paragraph_mut(para).add_tab_stop(250.0);

    doc.add_text(para, "Start \tRed \tText\n")?;
    let blue = doc.add_text(para, "Start \tBlue \tText\n")?;
    doc.text_run_mut(blue).style_mut().set_text_color(0, 0, 255);
    let last = doc.add_text(para, "Start Green Text\n")?;

    // Walk the runs and shrink them; extend the first one while walking.
    let mut index = 0;
    let mut itr = doc.iter_children(para);
    while itr.has_next(doc) {
        if let Some(run) = itr.current(doc)?.as_text_run() {
            doc.text_run_mut(run).style_mut().set_font_size(12.0);
            if index == 0 {
                let restored = format!("{}(restored red color)\n", doc.text_run(run).text());
                doc.text_run_mut(run).set_text(restored);
            }
        }
        itr.advance();
        index += 1;
    }

    doc.text_run_mut(last).style_mut().set_text_color(0, 255, 0);
    doc.text_run_mut(last).style_mut().set_italic(true);
    doc.text_run_mut(last).style_mut().set_font_size(18.0);
    doc.paragraph_mut(para).style_mut().set_bold(true);
    doc.paragraph_mut(para).set_border(0.2, 0, 127, 0);
    doc.text_run_mut(last).style_mut().set_bold(false);

    doc.add_paragraph_text(doc.body(), LOREM)?;
    Ok(())
}

/// A lettered list with nested decimal and roman sub-lists, interrupted by
/// a body paragraph and explicitly continued.
fn add_numbered_lists(doc: &mut FlowDocument) -> Result<()> {
    doc.add_paragraph_text(doc.body(), "Numbered lists, added in natural order\n")?;

    let list = doc.add_list(doc.body())?;
    doc.list_mut(list).set_number_format(NumberFormat::UpperLetter);
    doc.list_mut(list).set_start_index(4);

    let item = doc.add_item(list)?; // "D."
    doc.add_paragraph_text(item, "item 0[0]")?;
    let accent = doc.add_paragraph_text(item, "item 0[1]")?;
    doc.paragraph_mut(accent).style_mut().set_text_color(255, 99, 71);

    let item2 = doc.add_item(list)?; // "E."
    let inner = doc.add_list(item2)?;
    doc.list_mut(inner).set_start_index(0);
    doc.list_mut(inner).set_numbering(NumberFormat::Decimal, "", true);
    doc.add_item_text(inner, "item 1[0].0")?;
    doc.add_item_text(inner, "item 1[0].1")?;

    let roman_holder = doc.add_item(inner)?;
    let roman = doc.add_list(roman_holder)?;
    doc.list_mut(roman).set_start_index(7);
    doc.list_mut(roman).set_numbering(NumberFormat::UpperRoman, ")", true);
    doc.add_item_text(roman, "item 1[0].2.0")?;

    doc.add_paragraph_text(doc.body(), "---- splitting paragraph ----")?;

    // The paragraph broke the roman run; resume it where it left off.
    doc.continue_numbering(roman)?;
    doc.add_item_text(roman, "item 1[0].2.1 (continued)")?;

    doc.add_item_text(list, "item 2")?; // "F."
    doc.add_item_text(list, "item 3")?; // "G."
    doc.add_item_text(list, "item 4")?; // "H."
    Ok(())
}

/// Walk the body with a live cursor and append to every top-level list
/// mid-iteration; the appended items are reachable by the same cursor's
/// traversal.
fn grow_lists_in_place(doc: &mut FlowDocument) -> Result<()> {
    let mut itr = doc.iter_children(doc.body());
    while itr.has_next(doc) {
        if let Some(list) = itr.current(doc)?.as_list() {
            if doc.indentation_level(list)? == 1 {
                let item = doc.add_item(list)?;
                let para = doc.add_paragraph_text(item, "Item added during iteration")?;
                doc.paragraph_mut(para).style_mut().set_text_color(0, 127, 0);
            }
        }
        itr.advance();
    }
    Ok(())
}

/// A 4×5 table with alignment attributes, a nested table, and both merge
/// directions.
fn add_fact_table(doc: &mut FlowDocument) -> Result<()> {
    doc.add_paragraph_text(doc.body(), "\u{000C}")?; // table starts on a fresh page

    let table = doc.add_table(doc.body())?;
    doc.table_mut(table).set_default_column_width(100.0);
    doc.table_mut(table).set_default_row_height(15.0);

    for i in 0..4u8 {
        let row = doc.add_row(table)?;
        let height = doc.table(table).default_row_height() + f64::from(i) * 5.0;
        doc.table_row_mut(row).set_row_height(height);
        for j in 0..5u8 {
            let cell = doc.add_cell(row)?;
            doc.table_cell_mut(cell).set_border(0.5, 255, 0, 0);
            if i == 3 {
                let alignment = if j % 2 != 0 {
                    VerticalAlignment::Center
                } else {
                    VerticalAlignment::Bottom
                };
                doc.table_cell_mut(cell).set_vertical_alignment(alignment);
            }
            if (i, j) == (3, 4) {
                let title = doc.add_paragraph_text(cell, "Table title")?;
                doc.paragraph_mut(title)
                    .set_justification(Justification::Center);

                let nested = doc.add_table(cell)?;
                doc.table_mut(nested).set_default_column_width(33.0);
                doc.table_mut(nested).set_border(0.5, 0, 0, 0);
                for r in 0..3u8 {
                    let nested_row = doc.add_row(nested)?;
                    for c in 0..3u8 {
                        let nested_cell = doc.add_cell(nested_row)?;
                        doc.table_cell_mut(nested_cell).set_background_color(200, 200, 255);
                        doc.add_paragraph_text(nested_cell, &format!("{r}/{c}"))?;
                    }
                }
            } else {
                doc.add_paragraph_text(cell, &format!("Cell {j} x {i}"))?;
            }
        }
    }

    let merged = doc.merge_right(doc.cell_at(table, 2, 0)?, 1)?;
    doc.table_cell_mut(merged)
        .set_horizontal_alignment(HorizontalAlignment::Middle);
    let tall = doc.merge_down(doc.cell_at(table, 0, 0)?, 1)?;
    doc.table_cell_mut(tall)
        .set_vertical_alignment(VerticalAlignment::Center);
    Ok(())
}
