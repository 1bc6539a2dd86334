use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use catlocator_ml::training::{build_model_with, TrainingConfig};
use polars::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const ROOMS: [&str; 4] = ["kitchen", "hall", "office", "bedroom"];

fn create_telemetry(n_rows: usize) -> (DataFrame, Vec<String>) {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let mut beacon = Vec::with_capacity(n_rows);
    let mut tag = Vec::with_capacity(n_rows);
    let mut rssi = Vec::with_capacity(n_rows);
    let mut bx = Vec::with_capacity(n_rows);
    let mut by = Vec::with_capacity(n_rows);
    let mut bz = Vec::with_capacity(n_rows);
    let mut labels = Vec::with_capacity(n_rows);

    for _ in 0..n_rows {
        let room = rng.gen_range(0..ROOMS.len());
        let x = room as f64 * 3.0 + rng.gen::<f64>();
        let y = rng.gen::<f64>() * 5.0;
        beacon.push(format!("b{}", room * 2 + rng.gen_range(0..2)));
        tag.push(format!("cat-{}", rng.gen_range(0..3)));
        rssi.push(-40.0 - rng.gen::<f64>() * 50.0);
        bx.push(x);
        by.push(y);
        bz.push(rng.gen::<f64>() * 2.0);
        labels.push(ROOMS[room].to_string());
    }

    let mag: Vec<f64> = bx.iter().zip(&by).map(|(x, y)| (x * x + y * y).sqrt()).collect();
    let df = df!(
        "beacon_id" => beacon,
        "tag_id" => tag,
        "rssi" => rssi,
        "beacon_x" => bx,
        "beacon_y" => by,
        "beacon_z" => bz,
        "beacon_xy_mag" => mag
    )
    .unwrap();
    (df, labels)
}

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(10); // Fewer samples for training benchmarks

    let config = TrainingConfig::default().with_n_estimators(50);
    for n_rows in [500, 2000, 5000].iter() {
        let (df, labels) = create_telemetry(*n_rows);

        group.bench_with_input(BenchmarkId::new("fit", n_rows), &df, |b, df| {
            b.iter(|| {
                let mut pipeline = build_model_with(&config);
                pipeline.fit(black_box(df), black_box(&labels)).unwrap();
                pipeline
            })
        });
    }

    group.finish();
}

fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");

    // Train model once
    let (train_df, train_labels) = create_telemetry(2000);
    let mut pipeline = build_model_with(&TrainingConfig::default());
    pipeline.fit(&train_df, &train_labels).unwrap();

    for n_rows in [100, 1000, 10000].iter() {
        let (test_df, _) = create_telemetry(*n_rows);

        group.bench_with_input(BenchmarkId::new("predict", n_rows), &test_df, |b, df| {
            b.iter(|| pipeline.predict(black_box(df)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_training, bench_prediction);
criterion_main!(benches);
