use arxprep_filters::{CleaningRules, TextCleaner};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn bench_text_cleaning(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_cleaning");

    let sample_texts = vec![
        "Quantum Computing 2023!!",
        "We propose a novel method for training deep neural networks on graphs.",
        "The <i>ab initio</i> calculations show that the band gap closes at 12 GPa.",
        "Code and data are available at https://github.com/example/repo.",
        "   Multiple   spaces   and   tabs\t\there   ",
        "Schrödinger équation naïve résumé", // Accented characters
    ];

    group.throughput(Throughput::Elements(sample_texts.len() as u64));
    group.bench_function("scientific_english", |b| {
        let cleaner = TextCleaner::new(CleaningRules::scientific_english());
        b.iter(|| {
            for text in &sample_texts {
                black_box(cleaner.clean(text));
            }
        });
    });

    group.finish();
}

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");

    // Abstract-sized documents
    let documents: Vec<String> = (0..1000)
        .map(|i| {
            format!(
                "We study the spectra of {} random matrices and show that the eigenvalue \
                 statistics follow universal laws in the limit of large dimension {}. \
                 Our results extend previous bounds on spectral gaps of sparse graphs.",
                i,
                i * 100
            )
        })
        .collect();

    group.throughput(Throughput::Elements(documents.len() as u64));
    group.bench_function("1000_abstracts", |b| {
        let cleaner = TextCleaner::new(CleaningRules::scientific_english());
        b.iter(|| {
            for doc in &documents {
                black_box(cleaner.clean(doc));
            }
        });
    });

    group.finish();
}

fn bench_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_reuse");

    let texts = vec![
        "Dark matter halos in cosmological simulations",
        "Topological insulators and superconductors",
        "Stochastic gradient descent with momentum",
    ];

    group.bench_function("with_reuse", |b| {
        let cleaner = TextCleaner::new(CleaningRules::scientific_english());
        let mut buffer = String::new();
        b.iter(|| {
            for text in &texts {
                cleaner.clean_into(text, &mut buffer);
                black_box(&buffer);
            }
        });
    });

    group.bench_function("without_reuse", |b| {
        let cleaner = TextCleaner::new(CleaningRules::scientific_english());
        b.iter(|| {
            for text in &texts {
                black_box(cleaner.clean(text));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_text_cleaning, bench_throughput, bench_reuse);
criterion_main!(benches);
