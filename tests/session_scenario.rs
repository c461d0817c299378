//! Integration tests for strainview
//!
//! These tests drive a session through the public API, from `.dat` files on
//! disk to the projected chart and table.

use std::fs;
use std::path::Path;

use strainview::prelude::*;
use tempfile::tempdir;

const RUN_1001: &str = "\
Time\tLoad_Ratio:MON1\t1001A:MON1\t1001B:MON1\t1001C:MON1\t2001D:MON1\t2001E:MON1\tNote
s\t%\tμstrain\tμstrain\tμstrain\tμstrain\tμstrain\t-
0.0\t0\t1\t2\t0.5\t10\t20\tstart
0.5\t50\t2\t4\t1\t12\t22\tramp
1.0\t100\t3\t8\t1.5\t14\t24\tpeak
1.5\t50\t2\t4\t1\t12\t22\tunload
2.0\t0\t1\t2\t0.5\t10\t20\tend
";

const PREDICTION: &str = "\
Load\tPredicted_Strain
0\t0.0
50\t2.4
100\t4.8
";

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// The full inspection workflow on one file
#[test]
fn test_shear_trim_scenario() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "Wing_1001_static.dat", RUN_1001);

    let mut session = Session::default();
    session.load_file(&path).unwrap();

    // The free-text column is not numeric and is dropped on ingestion
    assert!(!session.dataset().unwrap().contains("Note"));
    assert_eq!(session.dataset().unwrap().row_count(), 5);
    assert_eq!(session.list_physical_channels().len(), 5);

    assert!(session.add_channel("1001A:MON1"));
    let outcome = session.compute_derived(SHEAR).unwrap();
    assert_eq!(outcome.names, vec!["1001S:MON1"]);
    assert!(outcome.warnings.is_empty());

    let dataset = session.dataset().unwrap();
    let a = dataset.values("1001A:MON1").unwrap();
    let b = dataset.values("1001B:MON1").unwrap();
    let c = dataset.values("1001C:MON1").unwrap();
    let s = dataset.values("1001S:MON1").unwrap();
    for i in 0..5 {
        assert_eq!(s[i], 2.0 * b[i] - a[i] - c[i]);
    }
    assert_eq!(
        dataset.column("1001S:MON1").unwrap().unit.as_deref(),
        Some("μstrain")
    );

    session.add_channel("1001S:MON1");
    session.set_trimmed(true).unwrap();
    let projection = session.project();
    assert_eq!(projection.table.row_count(), 3);
    assert_eq!(
        projection.table.columns,
        vec!["Load_Ratio:MON1", "1001A:MON1", "1001S:MON1"]
    );
    for series in &projection.chart.series {
        assert_eq!(series.x, vec![0.0, 50.0, 100.0]);
        assert_eq!(series.y.len(), 3);
    }

    session.set_trimmed(false).unwrap();
    assert_eq!(session.project().table.row_count(), 5);
}

#[test]
fn test_average_and_overlay() {
    let dir = tempdir().unwrap();
    let data = write(dir.path(), "Wing_1001_static.dat", RUN_1001);
    let prediction = write(dir.path(), "prediction.txt", PREDICTION);

    let mut session = Session::default();
    session.load_file(&data).unwrap();
    session.compute_derived(AVERAGE).unwrap();
    assert_eq!(
        session.dataset().unwrap().values("2001Avg:MON1"),
        Some(&[15.0, 17.0, 19.0, 17.0, 15.0][..])
    );

    // Overlay needs something on the chart first
    assert!(matches!(
        session.load_prediction_file(&prediction),
        Err(CoreError::NoPlottedChannels)
    ));

    session.add_channel("2001Avg:MON1");
    session.load_prediction_file(&prediction).unwrap();

    let projection = session.project();
    let overlay = projection.chart.overlay.unwrap();
    assert_eq!(overlay.x, vec![0.0, 50.0, 100.0]);
    assert_eq!(overlay.y, vec![0.0, 2.4, 4.8]);
    // The overlay is not part of the table
    assert_eq!(projection.table.columns, vec!["Load_Ratio:MON1", "2001Avg:MON1"]);
}

#[test]
fn test_scan_then_load_by_id() {
    let dir = tempdir().unwrap();
    write(dir.path(), "Wing_1001_static.dat", RUN_1001);
    write(dir.path(), "Wing_1002_static.dat", RUN_1001);
    write(dir.path(), "readme.txt", "not data");

    let index = SourceIndex::scan_dir(dir.path()).unwrap();
    assert_eq!(index.ids().collect::<Vec<_>>(), vec!["1001", "1002"]);

    let mut session = Session::default();
    session.load_file(index.get("1002").unwrap()).unwrap();
    assert!(session.is_loaded());
}

#[test]
fn test_failed_load_leaves_session_empty() {
    let dir = tempdir().unwrap();
    let good = write(dir.path(), "Wing_1001_static.dat", RUN_1001);
    let no_load = write(
        dir.path(),
        "Wing_1003_static.dat",
        "Time\t1001A:MON1\ns\tμstrain\n0\t1\n",
    );

    let mut session = Session::default();
    session.load_file(&good).unwrap();
    session.add_channel("1001A:MON1");

    let err = session.load_file(&no_load).unwrap_err();
    assert!(matches!(err, IngestionError::MissingLoadColumn(_)));
    assert!(!session.is_loaded());
    assert_eq!(session.project(), Projection::default());

    let err = session.load_file(dir.path().join("missing.dat")).unwrap_err();
    assert!(matches!(err, IngestionError::IoError(_)));
}

#[test]
fn test_custom_catalog_config() {
    let dir = tempdir().unwrap();
    let content = RUN_1001.replace("Load_Ratio:MON1", "Force:MON1");
    let path = write(dir.path(), "Wing_1001_static.dat", &content);

    let mut session = Session::default();
    assert!(session.load_file(&path).is_err());

    let mut config = SessionConfig::default();
    config.catalog.load_column_pattern = "Force".to_string();
    let mut session = Session::new(config);
    session.load_file(&path).unwrap();
    assert_eq!(session.catalog().unwrap().load_column(), "Force:MON1");
}

/// Property-based tests
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    const CHANNELS: [&str; 6] = [
        "1A:MON1", "1B:MON1", "1C:MON1", "2D:MON1", "2E:MON1", "1S:MON1",
    ];

    fn dataset(load: Vec<f64>) -> Dataset {
        let rows = load.len();
        let mut columns = vec![Column::new("Load_Ratio:MON1", Some("%"), load)];
        for (i, name) in CHANNELS.iter().take(5).enumerate() {
            let values = (0..rows).map(|r| (r * (i + 1)) as f64).collect();
            columns.push(Column::new(*name, Some("μstrain"), values));
        }
        Dataset::new(columns).unwrap()
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize),
        Remove(usize),
        Trim(bool),
        Shear,
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..CHANNELS.len()).prop_map(Op::Add),
            (0..CHANNELS.len()).prop_map(Op::Remove),
            any::<bool>().prop_map(Op::Trim),
            Just(Op::Shear),
            Just(Op::Clear),
        ]
    }

    fn channel_name() -> impl Strategy<Value = String> {
        ("[0-9]{1,3}", "[A-F]", "MON[12]").prop_map(|(p, r, m)| format!("{p}{r}:{m}"))
    }

    proptest! {
        /// Chart and table always describe the same channels over the same rows
        #[test]
        fn test_projection_consistency(
            load in prop::collection::vec(0.0f64..1000.0, 1..40),
            ops in prop::collection::vec(op(), 0..30),
        ) {
            let mut session = Session::default();
            session.load_dataset(dataset(load)).unwrap();

            for op in ops {
                match op {
                    Op::Add(i) => { session.add_channel(CHANNELS[i]); }
                    Op::Remove(i) => { session.remove_channel(CHANNELS[i]); }
                    Op::Trim(on) => { let _ = session.set_trimmed(on); }
                    Op::Shear => { session.compute_derived(SHEAR).unwrap(); }
                    Op::Clear => session.clear(),
                }

                let projection = session.project();
                let view_rows = session.active_view().unwrap().row_count();

                let mut expected = vec!["Load_Ratio:MON1".to_string()];
                expected.extend(projection.chart.channel_names().iter().map(|n| n.to_string()));
                prop_assert_eq!(&projection.table.columns, &expected);
                prop_assert_eq!(projection.chart.channel_names(), session.plotted_channels().iter().map(String::as_str).collect::<Vec<_>>());
                prop_assert_eq!(projection.table.row_count(), view_rows);
                for series in &projection.chart.series {
                    prop_assert_eq!(series.x.len(), view_rows);
                    prop_assert_eq!(series.y.len(), view_rows);
                }
                if !session.is_trimmed() {
                    prop_assert_eq!(view_rows, session.dataset().unwrap().row_count());
                }
            }
        }

        /// Group detection depends on the set of names, not their order
        #[test]
        fn test_grouping_is_order_independent(
            names in prop::collection::vec(channel_name(), 0..30),
            seed in any::<u64>(),
        ) {
            let mut shuffled = names.clone();
            // Deterministic shuffle driven by the seed
            let mut state = seed | 1;
            for i in (1..shuffled.len()).rev() {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                shuffled.swap(i, (state % (i as u64 + 1)) as usize);
            }

            let a = SensorGroups::detect(&names);
            let b = SensorGroups::detect(&shuffled);
            let describe = |g: &SensorGroups| g.iter().map(|s| s.to_string()).collect::<Vec<_>>();
            prop_assert_eq!(describe(&a), describe(&b));
            prop_assert_eq!(a.shear_rosettes().len(), b.shear_rosettes().len());
            prop_assert_eq!(a.average_pairs().len(), b.average_pairs().len());
        }

        /// Derivation is idempotent for any data
        #[test]
        fn test_derivation_idempotent(load in prop::collection::vec(0.0f64..1000.0, 1..20)) {
            let mut session = Session::default();
            session.load_dataset(dataset(load)).unwrap();

            session.compute_derived(SHEAR).unwrap();
            session.compute_derived(AVERAGE).unwrap();
            let columns = session.dataset().unwrap().column_count();

            prop_assert_eq!(session.compute_derived(SHEAR).unwrap().added(), 0);
            prop_assert_eq!(session.compute_derived(AVERAGE).unwrap().added(), 0);
            prop_assert_eq!(session.dataset().unwrap().column_count(), columns);
        }
    }
}
