use criterion::{Criterion, black_box, criterion_group, criterion_main};
use reflow_engine::content::FlowDocument;
use reflow_engine::content::document::NodeId;
mod common;

fn walk(doc: &FlowDocument, node: NodeId) -> usize {
    let mut count = 0;
    let mut itr = doc.iter_children(node);
    while itr.has_next(doc) {
        let element = itr.current(doc).unwrap();
        count += 1;
        if let Some(child) = element.as_node() {
            count += walk(doc, child);
        }
        itr.advance();
    }
    count
}

fn bench_full_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration");
    group.sample_size(20);

    let doc = common::build_document(1_000);
    group.bench_function("walk_1000_blocks", |b| {
        b.iter(|| {
            let visited = walk(&doc, black_box(doc.body().into()));
            black_box(visited);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_full_walk);
criterion_main!(benches);
