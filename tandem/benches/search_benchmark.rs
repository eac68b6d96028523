use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use tandem::models::DocumentPair;
use tandem::search::search_corpus;
use tandem::SearchScope;

const VOCAB: &[&str] = &[
    "contract", "party", "clause", "witness", "notary", "signature", "annex",
    "liability", "termination", "jurisdiction", "payment", "invoice", "tax",
    "property", "lease", "tenant", "landlord", "deed", "power", "attorney",
];

/// Deterministic synthetic corpus: repeating vocabulary with varying line
/// lengths, no randomness so runs are comparable.
fn synthetic_corpus(documents: usize, lines_per_doc: usize) -> Vec<Arc<DocumentPair>> {
    (0..documents)
        .map(|d| {
            let mut original = String::new();
            let mut translated = String::new();
            for line in 0..lines_per_doc {
                let words = 3 + (d + line) % 9;
                for w in 0..words {
                    let pick = VOCAB[(d * 31 + line * 7 + w) % VOCAB.len()];
                    if w > 0 {
                        original.push(' ');
                        translated.push(' ');
                    }
                    original.push_str(pick);
                    translated.push_str(pick);
                }
                original.push('\n');
                translated.push('\n');
            }
            Arc::new(DocumentPair::new(
                format!("doc-{d}"),
                format!("doc-{d}.pdf"),
                original,
                translated,
                "de".to_string(),
            ))
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let corpus = synthetic_corpus(200, 400);

    let queries = vec![
        ("short_word", "tax"),
        ("common_word", "contract"),
        ("phrase", "power of attorney"),
        ("case_insensitive", "CONTRACT"),
        ("no_hits", "zzzzzz"),
    ];

    let mut group = c.benchmark_group("search");
    group.sample_size(20);

    for (name, query) in queries {
        group.bench_function(name, |b| {
            b.iter(|| search_corpus(&corpus, query, SearchScope::Both));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
