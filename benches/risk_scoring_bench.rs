//! Benchmarks for single-case scoring and batch assessment of case exports.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use derivapp::{
    assess_cases, compute_risk_assessment, compute_risk_assessment_from_labels, rank_by_risk,
    CaseRecord, CaseStatus, FollowUpOutcome, Priority,
};
use std::hint::black_box;

const LABELS: [&str; 6] = ["positive", "neutral", "pending", "negative", "Negative ", "unknown"];
const PRIORITIES: [&str; 3] = ["low", "medium", "high"];

fn create_cases(count: usize) -> Vec<CaseRecord> {
    (0..count)
        .map(|i| {
            let mut case = CaseRecord::new()
                .with_id(format!("case-{i}"))
                .with_priority(PRIORITIES[i % PRIORITIES.len()])
                .with_status(if i % 7 == 0 { "closed" } else { "open" });
            for j in 0..(i % 12) {
                case = case.with_follow_up(LABELS[(i + j) % LABELS.len()]);
            }
            case
        })
        .collect()
}

fn bench_single_case(c: &mut Criterion) {
    let outcomes: Vec<FollowUpOutcome> = (0..50)
        .map(|i| FollowUpOutcome::ALL[i % FollowUpOutcome::ALL.len()])
        .collect();
    let labels: Vec<&str> = (0..50).map(|i| LABELS[i % LABELS.len()]).collect();

    let mut group = c.benchmark_group("single_case");
    group.bench_function("typed", |b| {
        b.iter(|| compute_risk_assessment(black_box(&outcomes), Priority::High, CaseStatus::Open))
    });
    group.bench_function("labels", |b| {
        b.iter(|| compute_risk_assessment_from_labels(black_box(&labels), "high", "open"))
    });
    group.finish();
}

fn bench_batch_assessment(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_assessment");
    for size in [100, 1_000, 10_000] {
        let cases = create_cases(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &cases, |b, cases| {
            b.iter(|| rank_by_risk(assess_cases(black_box(cases))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_case, bench_batch_assessment);
criterion_main!(benches);
