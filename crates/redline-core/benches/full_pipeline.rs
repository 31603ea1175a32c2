//! Full-pipeline benchmark over a realistic consultation transcript.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use redline_core::{AnalysisRequest, TranscriptAnalyzer};

fn sample_request() -> AnalysisRequest {
    let original = "the patient recieved 5ml of juvaderm filler in the nasolabial folds \
        and twenty units of botox in the glabella she tolerated the procedure well \
        and will return for a follow up in two weeks no adverse reactions were noted";
    let corrected = "the patient received 5ml of juvederm filler in the nasolabial folds \
        and 20 units of botox in the glabella she tolerated the procedure well \
        and will return for a follow up in two weeks no adverse reactions were noted";
    let ground_truth = "the patient received 50ml of juvederm filler in the nasolabial folds \
        and 20 units of botox in the glabella she tolerated the procedure well \
        and will return for a follow up in two weeks no adverse reactions were noted";

    AnalysisRequest {
        original: original.to_string(),
        corrected: corrected.to_string(),
        ground_truth: ground_truth.to_string(),
        consultation_id: "bench-001".to_string(),
        backend: "bench".to_string(),
    }
}

fn bench_analyze(c: &mut Criterion) {
    let analyzer = TranscriptAnalyzer::with_defaults();
    let request = sample_request();

    c.bench_function("analyze_single_consultation", |b| {
        b.iter(|| analyzer.analyze(black_box(&request)))
    });
}

fn bench_analyze_batch(c: &mut Criterion) {
    let analyzer = TranscriptAnalyzer::with_defaults();
    let requests: Vec<AnalysisRequest> = (0..16)
        .map(|i| {
            let mut r = sample_request();
            r.consultation_id = format!("bench-{i:03}");
            r
        })
        .collect();

    c.bench_function("analyze_batch_16", |b| {
        b.iter(|| analyzer.analyze_batch(black_box(&requests)))
    });
}

criterion_group!(benches, bench_analyze, bench_analyze_batch);
criterion_main!(benches);
