use criterion::{Criterion, black_box, criterion_group, criterion_main};
use relief_terrain::fft::Fft2d;
use relief_terrain::*;

fn bench_params() -> GenerationParams {
    GenerationParams {
        exponent: 8,
        initial_altitudes: 1.0,
        amplitude: 1.0,
        roughness: 0.5,
        ..Default::default()
    }
}

fn bench_midpoint_displacement(c: &mut Criterion) {
    let params = bench_params();
    c.bench_function("midpoint_257", |bencher| {
        bencher.iter(|| black_box(generate(Algorithm::MidpointDisplacement, &params, 42)))
    });
}

fn bench_diamond_square(c: &mut Criterion) {
    let params = bench_params();
    c.bench_function("diamond_square_257", |bencher| {
        bencher.iter(|| black_box(generate(Algorithm::DiamondSquares, &params, 42)))
    });
}

fn bench_spectral_synthesis(c: &mut Criterion) {
    let params = bench_params();
    c.bench_function("spectral_256", |bencher| {
        bencher.iter(|| black_box(generate(Algorithm::FastFourierTransform, &params, 42)))
    });
}

fn bench_fft_round_trip(c: &mut Criterion) {
    let fft = Fft2d::new(128).expect("128 is a power of two");
    let grid = white_noise(128, 1.0, &mut RandomSource::from_seed(7));
    c.bench_function("fft_round_trip_128", |bencher| {
        bencher.iter(|| {
            let spectrum = fft.forward(black_box(&grid)).expect("sizes match");
            black_box(fft.inverse(&spectrum).expect("sizes match"))
        })
    });
}

fn bench_normalize(c: &mut Criterion) {
    let grid = generate(Algorithm::DiamondSquares, &bench_params(), 42).expect("valid params");
    c.bench_function("normalize_257", |bencher| {
        bencher.iter(|| {
            let mut copy = grid.clone();
            black_box(normalize(&mut copy))
        })
    });
}

criterion_group!(
    benches,
    bench_midpoint_displacement,
    bench_diamond_square,
    bench_spectral_synthesis,
    bench_fft_round_trip,
    bench_normalize,
);
criterion_main!(benches);
