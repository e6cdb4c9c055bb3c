use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glyphkit_core::{approximate, normalize, GlyphPath, MatrixCodec, PathCommand, Point, Wavelet};

fn outline(commands: usize) -> GlyphPath {
    let mut path = GlyphPath::new();
    path.push(PathCommand::MoveTo(Point::new(0.0, 0.0)));
    for i in 1..commands {
        let t = i as f64 * 0.1;
        if i % 5 == 0 {
            path.push(PathCommand::CurveTo(
                Point::new(t, t.sin()),
                Point::new(t + 0.3, t.cos()),
                Point::new(t + 0.6, (t * 2.0).sin()),
            ));
        } else {
            path.push(PathCommand::LineTo(Point::new(t, (t * 3.0).cos())));
        }
    }
    path.push(PathCommand::Close);
    path
}

fn bench_encode_decode(c: &mut Criterion) {
    let path = outline(1000);
    let codec = MatrixCodec::new();
    let matrix = codec.encode(&path).unwrap();

    c.bench_function("encode_1000_commands", |b| {
        b.iter(|| codec.encode(black_box(&path)).unwrap())
    });
    c.bench_function("decode_1000_rows", |b| {
        b.iter(|| codec.decode(black_box(&matrix)))
    });
}

fn bench_normalize(c: &mut Criterion) {
    let matrix = MatrixCodec::new().encode(&outline(1000)).unwrap();
    c.bench_function("normalize_1000_rows", |b| {
        b.iter(|| normalize(black_box(&matrix)))
    });
}

fn bench_approximate(c: &mut Criterion) {
    let path = outline(1000);
    c.bench_function("approximate_db2_keep_half", |b| {
        b.iter(|| approximate(black_box(&path), 0.5, Wavelet::Db2))
    });
}

criterion_group!(benches, bench_encode_decode, bench_normalize, bench_approximate);
criterion_main!(benches);
