//! Benchmarks for page rendering and terminal layout.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lectio::document::layout_page;
use lectio::payload::{Division, DocumentPayload, Meta};
use lectio::render::{Page, render_document};
use lectio::theme::MemoryPreferenceStore;
use lectio::tracker::VisibilitySource;

struct Ignore;

impl VisibilitySource for Ignore {
    fn observe(&mut self, _section_id: &str) {}
    fn unobserve(&mut self, _section_id: &str) {}
}

fn edition(divisions: usize) -> DocumentPayload {
    let divs = (1..=divisions)
        .map(|n| Division {
            n: format!("{n}"),
            kind: "chapter".into(),
            html: (1..=12)
                .map(|line| {
                    format!(
                        r#"<p lang="grc">ἄνδρα μοι ἔννεπε μοῦσα {n}.{line}</p><p lang="en">Tell me, Muse, of the man {n}.{line}</p>"#
                    )
                })
                .collect(),
            commentary_html: format!("<p>On chapter {n} <span data-ref=\"#c{n}\">ref</span>.</p>"),
            apparatus_html: "<p>ἔννεπε] ἔνεπε B</p>".into(),
        })
        .collect();
    DocumentPayload {
        meta: Meta::default(),
        divs,
    }
}

fn bench_render_document(c: &mut Criterion) {
    let payload = edition(200);
    let prefs = MemoryPreferenceStore::default();
    c.bench_function("render_document", |b| {
        b.iter(|| render_document(black_box(&payload), Page::new(), &mut Ignore, &prefs));
    });
}

fn bench_layout_page(c: &mut Criterion) {
    let payload = edition(200);
    let rendered = render_document(&payload, Page::new(), &mut Ignore, &MemoryPreferenceStore::default());
    c.bench_function("layout_page", |b| {
        b.iter(|| layout_page(black_box(&rendered.page), black_box(100)));
    });
}

criterion_group!(benches, bench_render_document, bench_layout_page);
criterion_main!(benches);
