use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use strainview::prelude::*;

/// Build a dataset with `rosettes` shear rosettes and as many average pairs
fn create_wide_dataset(rosettes: usize, rows: usize) -> Dataset {
    let load: Vec<f64> = (0..rows)
        .map(|r| {
            let half = rows as f64 / 2.0;
            100.0 - ((r as f64 - half).abs() / half) * 100.0
        })
        .collect();

    let mut columns = vec![Column::new("Load_Ratio:MON1", Some("%"), load)];
    for g in 0..rosettes {
        for (k, role) in ['A', 'B', 'C'].iter().enumerate() {
            let values = (0..rows).map(|r| (r * (k + 1) + g) as f64 * 0.1).collect();
            columns.push(Column::new(format!("{}{}:MON1", 1000 + g, role), Some("μstrain"), values));
        }
        for (k, role) in ['D', 'E'].iter().enumerate() {
            let values = (0..rows).map(|r| (r + k + g) as f64 * 0.2).collect();
            columns.push(Column::new(format!("{}{}:MON1", 5000 + g, role), Some("μstrain"), values));
        }
    }
    Dataset::new(columns).unwrap()
}

/// Benchmark running both calculations on a freshly loaded dataset
fn bench_compute_derived(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_derived");
    let rows = 10_000;

    for rosettes in [10, 50, 200] {
        group.throughput(Throughput::Elements((rosettes * 2 * rows) as u64));
        let dataset = create_wide_dataset(rosettes, rows);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}groups", rosettes)),
            &rosettes,
            |b, _| {
                b.iter(|| {
                    let mut session = Session::default();
                    session.load_dataset(dataset.clone()).unwrap();
                    black_box(session.compute_derived(SHEAR).unwrap());
                    black_box(session.compute_derived(AVERAGE).unwrap());
                });
            },
        );
    }

    group.finish();
}

/// Benchmark projecting a trimmed view onto many plotted channels
fn bench_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("project");
    let rows = 10_000;

    let mut session = Session::default();
    session.load_dataset(create_wide_dataset(50, rows)).unwrap();
    session.compute_derived(SHEAR).unwrap();
    let channels = session.list_channels();

    for plotted in [1, 10, 50] {
        session.clear();
        for name in channels.iter().take(plotted) {
            session.add_channel(name);
        }
        session.set_trimmed(true).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}channels", plotted)),
            &plotted,
            |b, _| {
                b.iter(|| black_box(session.project()));
            },
        );
    }

    group.finish();
}

/// Benchmark sensor group detection on the physical channel list
fn bench_detect_groups(c: &mut Criterion) {
    let dataset = create_wide_dataset(200, 10);
    let mut session = Session::default();
    session.load_dataset(dataset).unwrap();
    let names = session.list_physical_channels().to_vec();

    c.bench_function("detect_groups_1000_channels", |b| {
        b.iter(|| black_box(SensorGroups::detect(black_box(&names))));
    });
}

criterion_group!(benches, bench_compute_derived, bench_project, bench_detect_groups);
criterion_main!(benches);
