use criterion::{BatchSize, Criterion, Throughput};
use libplatform::mock::MockWire;
use libplatform::wire::{BUFFER_LENGTH, Wire};
use std::hint::black_box;

const DEVICE: u8 = 0x50;

fn enabled_bus() -> MockWire {
    let mut wire = MockWire::new();
    wire.begin();
    wire
}

pub fn bench_register_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("register_write");
    let payload = [0x5Au8; BUFFER_LENGTH];
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("full_buffer", |b| {
        b.iter_batched_ref(
            enabled_bus,
            |wire| {
                wire.begin_transmission(DEVICE);
                wire.write_bytes(black_box(&payload));
                black_box(wire.end_transmission())
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

pub fn bench_register_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("register_read");
    group.throughput(Throughput::Bytes(BUFFER_LENGTH as u64));
    group.bench_function("request_and_drain", |b| {
        b.iter_batched_ref(
            || {
                let mut wire = enabled_bus();
                wire.queue_response(DEVICE, &[0xA5; BUFFER_LENGTH]);
                wire
            },
            |wire| {
                wire.request_from(DEVICE, BUFFER_LENGTH);
                let mut sum = 0i32;
                while wire.available() > 0 {
                    sum += wire.read();
                }
                black_box(sum)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}
