use criterion::{criterion_group, criterion_main};

mod serial;
mod wire;

criterion_group!(
    benches,
    time::bench_decompose,
    time::bench_compose,
    wire::bench_register_write,
    wire::bench_register_read,
    serial::bench_println
);
criterion_main!(benches);
