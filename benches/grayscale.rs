use bmp_qr::utils::grayscale::bgr_row_to_grayscale;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_row(c: &mut Criterion, width: usize) {
    let stride = (width * 3 + 3) & !3;
    let row: Vec<u8> = (0..stride).map(|i| i as u8).collect();
    let mut gray = vec![0u8; width];
    c.bench_function(&format!("bgr_row_to_grayscale_{}", width), |b| {
        b.iter(|| bgr_row_to_grayscale(black_box(&row), black_box(&mut gray)))
    });
}

fn bench_bgr_row_small(c: &mut Criterion) {
    bench_row(c, 100);
}

fn bench_bgr_row_medium(c: &mut Criterion) {
    bench_row(c, 640);
}

fn bench_bgr_row_large(c: &mut Criterion) {
    bench_row(c, 1920);
}

criterion_group!(
    benches,
    bench_bgr_row_small,
    bench_bgr_row_medium,
    bench_bgr_row_large
);
criterion_main!(benches);
