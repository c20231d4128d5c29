use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dwd_radar::{ColorScale, OutputUnits, RawGrid, NODATA};

fn national_grid() -> RawGrid {
    let values = (0..900 * 900)
        .map(|i| if i % 11 == 0 { NODATA } else { (i % 250) as f64 })
        .collect();
    RawGrid::new(900, 900, values).unwrap()
}

fn bench_conversion(c: &mut Criterion) {
    let raw = national_grid();
    c.bench_function("mask_and_dbz", |b| {
        b.iter(|| black_box(&raw).mask_equal(NODATA).to_dbz())
    });

    let dbz = raw.mask_equal(NODATA).to_dbz();
    c.bench_function("dbz_to_rainrate", |b| b.iter(|| black_box(&dbz).to_rainrate()));

    let rain = dbz.to_rainrate();
    let scale = ColorScale::for_units(OutputUnits::RainRate);
    c.bench_function("color_lookup", |b| {
        b.iter(|| {
            black_box(&rain)
                .values()
                .iter()
                .filter_map(|v| scale.color(*v))
                .count()
        })
    });
}

criterion_group!(benches, bench_conversion);
criterion_main!(benches);
