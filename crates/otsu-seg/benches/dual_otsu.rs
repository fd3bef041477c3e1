use criterion::{black_box, criterion_group, criterion_main, Criterion};
use otsu_seg::core::{GrayImage, Histogram, BINS};
use otsu_seg::dual_otsu::solve_dual_otsu;
use otsu_seg::Segmenter;

fn three_mode_histogram() -> Histogram {
    let mut bins = [0f32; BINS];
    for (i, b) in bins.iter_mut().enumerate() {
        let x = i as f32;
        *b = 200.0 * (-(x - 40.0).powi(2) / 200.0).exp()
            + 120.0 * (-(x - 128.0).powi(2) / 300.0).exp()
            + 256.0 * (-(x - 210.0).powi(2) / 150.0).exp();
    }
    Histogram::from_bins(bins)
}

fn banded_image(size: usize) -> GrayImage {
    let mut data = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let v = match (x * 3 / size, (x ^ y) & 7) {
                (0, n) => 35 + n as u8,
                (1, n) => 125 + n as u8,
                (_, n) => 205 + n as u8,
            };
            data.push(v);
        }
    }
    GrayImage {
        width: size,
        height: size,
        data,
    }
}

fn dual_otsu_benchmarks(c: &mut Criterion) {
    let hist = three_mode_histogram();
    c.bench_function("solve_dual_otsu", |b| {
        b.iter(|| solve_dual_otsu(black_box(&hist)))
    });

    let img = banded_image(512);
    let seg = Segmenter::default();
    c.bench_function("segment_gray_512", |b| {
        b.iter(|| seg.segment_gray(black_box(&img.view())))
    });
}

criterion_group!(benches, dual_otsu_benchmarks);
criterion_main!(benches);
