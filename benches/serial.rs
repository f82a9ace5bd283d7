use criterion::{BatchSize, Criterion};
use libplatform::mock::{MockClock, MockSerial};
use libplatform::serial::Serial;
use std::hint::black_box;

pub fn bench_println(c: &mut Criterion) {
    let mut group = c.benchmark_group("println");
    let clock = MockClock::new();
    group.bench_function("mixed_line", |b| {
        b.iter_batched_ref(
            || {
                let mut serial = MockSerial::new(&clock);
                serial.begin(115_200);
                serial
            },
            |serial| {
                let mut n = serial.print_str("t=");
                n += serial.print_float(black_box(21.75));
                n += serial.print_str(" id=0x");
                n += serial.println_radix(black_box(0xBEEF), 16);
                serial.flush();
                black_box(n)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}
