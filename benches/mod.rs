use criterion::{criterion_group, criterion_main};


criterion_group!(
    benches,
    sequence_bench::bench_sequence_mutations,
    sequence_bench::bench_snapshot,
    dispatch_bench::bench_queue_throughput,
    dispatch_bench::bench_dispatch_round_trip,
);
criterion_main!(benches);
