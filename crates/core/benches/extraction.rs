use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use readability_core::{Document, ReadabilityOptions, SiteRules, strip_markup};
use std::sync::Arc;

fn synthetic_page(paragraphs: usize) -> String {
    let body: String = (0..paragraphs)
        .map(|i| {
            format!(
                "<div class='entry'><p>Paragraph {i} of the story, with a clause, another clause and a full stop. {}</p></div>\
                 <div class='sidebar'><a href='/{i}'>Related {i}</a></div>",
                "Filler words keep the paragraph long enough to score. ".repeat(4)
            )
        })
        .collect();
    format!("<html><head><script>var x = 1;</script></head><body><div id='main'>{body}</div></body></html>")
}

fn bench_parse(c: &mut Criterion) {
    let small = synthetic_page(5);
    let medium = synthetic_page(50);
    let large = synthetic_page(500);

    let mut group = c.benchmark_group("parse");

    for (name, html) in [("small", &small), ("medium", &medium), ("large", &large)] {
        group.bench_with_input(BenchmarkId::new(name, html.len()), html, |b, html| {
            b.iter(|| Document::parse(black_box(html)))
        });
    }

    group.finish();
}

fn bench_full_extraction(c: &mut Criterion) {
    let html = synthetic_page(50);
    let rules = Arc::new(SiteRules::new());

    c.bench_function("full_extraction", |b| {
        b.iter(|| {
            Document::new(black_box(&html), ReadabilityOptions::default())
                .with_rules(Arc::clone(&rules))
                .content()
        })
    });
}

fn bench_preprocess(c: &mut Criterion) {
    let html = synthetic_page(50);

    c.bench_function("strip_markup", |b| b.iter(|| strip_markup(black_box(&html))));
}

fn bench_scoring(c: &mut Criterion) {
    let html = synthetic_page(50);
    let doc = Document::parse(&html);

    c.bench_function("score_paragraphs", |b| b.iter(|| black_box(&doc).score_paragraphs()));
}

criterion_group!(benches, bench_parse, bench_full_extraction, bench_preprocess, bench_scoring);
criterion_main!(benches);
