use chunkbuf::ChunkBuf;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use textfmt::{args, count_digits, format_into, parse, sprint, Base, Options};

fn bench_mixed_line(c: &mut Criterion) {
    let ptr = 1000 as *const u8;
    let fmt = "{0:0.10f}:{1:04}:{2:+g}:{3}:{4}:{5:c}:%";

    c.bench_function("mixed_line_sprint", |b| {
        b.iter(|| sprint(black_box(fmt), &args!(0.125, 42, 0.25, "str", ptr, 'X')).unwrap());
    });

    c.bench_function("mixed_line_reused_buffer", |b| {
        let mut buf: ChunkBuf = ChunkBuf::new();
        b.iter(|| {
            buf.reset();
            format_into(&mut buf, black_box(fmt), &args!(0.125, 42, 0.25, "str", ptr, 'X'))
                .unwrap();
            black_box(buf.len())
        });
    });

    c.bench_function("mixed_line_parsed_once", |b| {
        let directive = parse(fmt).unwrap();
        let options = Options::default();
        let mut buf: ChunkBuf = ChunkBuf::new();
        b.iter(|| {
            buf.reset();
            directive
                .render(&mut buf, &args!(0.125, 42, 0.25, "str", ptr, 'X'), &options)
                .unwrap();
            black_box(buf.len())
        });
    });
}

fn bench_integers(c: &mut Criterion) {
    let mut group = c.benchmark_group("integers");
    for (name, fmt) in [("decimal", "{}"), ("hex", "{:#x}"), ("padded", "{:>24}")] {
        group.bench_with_input(BenchmarkId::new("format", name), fmt, |b, fmt| {
            let mut buf: ChunkBuf = ChunkBuf::new();
            let mut n = 1u64;
            b.iter(|| {
                buf.reset();
                n = n.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                format_into(&mut buf, fmt, &args!(black_box(n))).unwrap();
                black_box(buf.len())
            });
        });
    }
    group.bench_function("count_digits", |b| {
        let mut n = 1u64;
        b.iter(|| {
            n = n.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            black_box(count_digits(black_box(n), Base::DECIMAL))
        });
    });
    group.finish();
}

fn bench_floats(c: &mut Criterion) {
    let mut group = c.benchmark_group("floats");
    let values = [0.1, 152.29385, 1.0e-7, 6.02214076e23, 5e-324];
    group.throughput(Throughput::Elements(values.len() as u64));
    for (name, fmt) in [
        ("shortest", "{}"),
        ("fixed_2", "{:.2f}"),
        ("exp", "{:e}"),
        ("general_17", "{:.17g}"),
    ] {
        group.bench_with_input(BenchmarkId::new("format", name), fmt, |b, fmt| {
            let mut buf: ChunkBuf = ChunkBuf::new();
            b.iter(|| {
                buf.reset();
                for value in values {
                    format_into(&mut buf, fmt, &args!(black_box(value))).unwrap();
                }
                black_box(buf.len())
            });
        });
    }
    group.finish();
}

fn bench_styles(c: &mut Criterion) {
    c.bench_function("styled_line", |b| {
        let mut buf: ChunkBuf = ChunkBuf::new();
        b.iter(|| {
            buf.reset();
            format_into(
                &mut buf,
                black_box("{!tBRIGHT_GREEN;BG}{:<10}{!}{!#ff8000;BU}{:>8.3f}{!}"),
                &args!("status", 99.5),
            )
            .unwrap();
            black_box(buf.len())
        });
    });
}

criterion_group!(
    benches,
    bench_mixed_line,
    bench_integers,
    bench_floats,
    bench_styles
);
criterion_main!(benches);
