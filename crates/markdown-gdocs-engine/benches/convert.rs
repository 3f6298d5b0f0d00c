use criterion::{Criterion, criterion_group, criterion_main};
use markdown_gdocs_engine::{BatchUpdate, ConvertOptions, convert, markdown_to_operations, parse_markdown};

fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **bold**, *italic* and `code` content.\n\n- Bullet point\n  - Nested item with a [link](https://example.com)\n- Another item\n\n> Quoted line\n\n<!-- hidden note -->\n\n";
    base.repeat(size)
}

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    group.sample_size(10);

    let options = ConvertOptions::default();
    let small = generate_markdown_content(10);
    let large = generate_markdown_content(1000);

    group.bench_function("parse_large", |b| {
        b.iter(|| parse_markdown(std::hint::black_box(&large)));
    });

    let tree = parse_markdown(&large);
    group.bench_function("convert_parsed_large", |b| {
        b.iter(|| convert(std::hint::black_box(&tree), &options).unwrap());
    });

    group.bench_function("end_to_end_small", |b| {
        b.iter(|| {
            let ops = markdown_to_operations(std::hint::black_box(&small), &options).unwrap();
            std::hint::black_box(BatchUpdate::from_operations(ops));
        });
    });

    group.bench_function("serialize_large", |b| {
        let ops = markdown_to_operations(&large, &options).unwrap();
        let batch = BatchUpdate::from_operations(ops);
        b.iter(|| serde_json::to_string(std::hint::black_box(&batch)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_conversion);
criterion_main!(benches);
