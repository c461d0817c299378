use super::*;
use crate::dataset::Column;

fn sample_dataset() -> Dataset {
    Dataset::new(vec![
        Column::new("Time", Some("s"), vec![0.0, 1.0]),
        Column::new("Load_Ratio:MON1", Some("%"), vec![0.0, 50.0]),
        Column::new("1001A:MON1", Some("μstrain"), vec![1.0, 2.0]),
        Column::new("Temp:MON2", Some("degC"), vec![20.0, 21.0]),
        Column::new("1001B:MON1", Some("µstrain"), vec![3.0, 4.0]),
    ])
    .unwrap()
}

#[test]
fn test_catalog_classification() {
    let catalog = ChannelCatalog::from_dataset(&sample_dataset(), &CatalogConfig::default()).unwrap();

    assert_eq!(catalog.load_column(), "Load_Ratio:MON1");
    assert_eq!(catalog.physical_channels(), vec!["1001A:MON1", "1001B:MON1"]);

    let kinds: Vec<ChannelKind> = catalog.channels().iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ChannelKind::Other,
            ChannelKind::Load,
            ChannelKind::Strain,
            ChannelKind::Other,
            ChannelKind::Strain,
        ]
    );
}

#[test]
fn test_catalog_missing_load_column() {
    let dataset = Dataset::new(vec![Column::new("10A:MON1", Some("μstrain"), vec![1.0])]).unwrap();
    let err = ChannelCatalog::from_dataset(&dataset, &CatalogConfig::default()).unwrap_err();
    assert!(matches!(err, IngestionError::MissingLoadColumn(ref p) if p == "Load_Ratio"));
}

#[test]
fn test_catalog_custom_pattern() {
    let config = CatalogConfig {
        load_column_pattern: "Temp".to_string(),
        ..Default::default()
    };
    let catalog = ChannelCatalog::from_dataset(&sample_dataset(), &config).unwrap();
    assert_eq!(catalog.load_column(), "Temp:MON2");
}

#[test]
fn test_search_ordering() {
    let names = ["2001A:MON1", "1001B:MON1", "1001A:MON1", "X1001:MON1", "1001S:MON1"];

    assert_eq!(
        search_channels(&names, "1001"),
        vec!["1001A:MON1", "1001B:MON1", "1001S:MON1", "X1001:MON1"]
    );
    assert_eq!(search_channels(&names, "mon1").len(), names.len());
    assert_eq!(search_channels(&names, "a:mon"), vec!["1001A:MON1", "2001A:MON1"]);
    assert!(search_channels(&names, "zzz").is_empty());
}

#[test]
fn test_search_empty_term_sorts_all() {
    let names = vec!["b".to_string(), "A".to_string(), "c".to_string()];
    assert_eq!(search_channels(&names, ""), vec!["A", "b", "c"]);
}
