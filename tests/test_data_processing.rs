//! Integration test: loading, sample generation and splitting

use frame_importance::data::{
    create_sample_data, split_indices, train_test_split, DataLoader, DataSource, Dataset,
    SampleGenerator, FEATURE_COLUMNS, SAMPLE_SIZE, TARGET_COLUMN,
};
use frame_importance::FrameImportanceError;
use polars::prelude::*;
use std::io::Write;

const HEADER: &str =
    "FrameIndex,Timestamp,IsKeyFrame,VisualComplexity,ColorVariance,EdgeDensity,Brightness,Contrast,AspectRatio,ImportanceScore";

fn write_csv(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{}", contents).unwrap();
    path
}

fn annotated_rows(n: usize) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for i in 0..n {
        let v = (i % 10) as f64 / 10.0;
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},1.778,{}\n",
            i,
            i as f64 * 0.5,
            i % 2 == 0,
            v,
            1.0 - v,
            v * 0.5,
            0.5,
            v,
            v * 0.8
        ));
    }
    csv
}

#[test]
fn test_sample_data_schema() {
    let df = create_sample_data().unwrap();

    assert_eq!(df.height(), SAMPLE_SIZE);
    for name in FEATURE_COLUMNS.iter().chain(std::iter::once(&TARGET_COLUMN)) {
        assert!(df.column(name).is_ok(), "missing column {}", name);
    }
    for extra in ["FrameIndex", "Timestamp", "IsKeyFrame"] {
        assert!(df.column(extra).is_ok(), "missing column {}", extra);
    }
}

#[test]
fn test_sample_data_is_reproducible() {
    let a = Dataset::from_dataframe(&create_sample_data().unwrap()).unwrap();
    let b = Dataset::from_dataframe(&create_sample_data().unwrap()).unwrap();

    assert_eq!(a.features, b.features);
    assert_eq!(a.target, b.target);

    let c = Dataset::from_dataframe(&SampleGenerator::new().with_seed(7).generate().unwrap())
        .unwrap();
    assert_ne!(a.target, c.target);
}

#[test]
fn test_sample_scores_in_unit_interval() {
    let dataset = Dataset::from_dataframe(&create_sample_data().unwrap()).unwrap();
    assert!(dataset.target.iter().all(|&s| (0.0..=1.0).contains(&s)));
}

#[test]
fn test_csv_with_extra_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "frames.csv", &annotated_rows(25));

    let loaded = DataLoader::new().load_training_data(&path).unwrap();

    assert_eq!(loaded.dataset.n_samples(), 25);
    assert_eq!(loaded.dataset.feature_names, FEATURE_COLUMNS.to_vec());
    assert_eq!(loaded.source, DataSource::File(path));
}

#[test]
fn test_missing_file_generates_sample_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("frames.csv");

    let loaded = DataLoader::new().load_training_data(&path).unwrap();

    assert_eq!(loaded.dataset.n_samples(), SAMPLE_SIZE);
    assert_eq!(loaded.source, DataSource::Synthetic { seed: 42 });
}

#[test]
fn test_malformed_csv_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "frames.csv",
        "VisualComplexity,ColorVariance\n0.1,0.2\n0.3,0.4\n",
    );

    let err = DataLoader::new().load_training_data(&path).unwrap_err();
    assert!(matches!(err, FrameImportanceError::ColumnNotFound(_)));
}

#[test]
fn test_header_only_csv_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "frames.csv", &format!("{}\n", HEADER));

    assert!(DataLoader::new().load_training_data(&path).is_err());
}

#[test]
fn test_split_of_sample_data() {
    let dataset = Dataset::from_dataframe(&create_sample_data().unwrap()).unwrap();

    let (train, test) = train_test_split(&dataset, 0.2, 42).unwrap();

    assert_eq!(train.n_samples(), 800);
    assert_eq!(test.n_samples(), 200);
    assert_eq!(train.n_features(), 6);
    assert_eq!(test.feature_names, dataset.feature_names);
}

#[test]
fn test_split_partitions_rows() {
    let split = split_indices(50, 0.3, 42).unwrap();

    let mut all: Vec<usize> = split.train_indices.iter().chain(split.test_indices.iter()).copied().collect();
    all.sort_unstable();
    assert_eq!(all, (0..50).collect::<Vec<_>>());
    assert_eq!(split.test_indices.len(), 15);

    assert_eq!(split, split_indices(50, 0.3, 42).unwrap());
}

#[test]
fn test_split_rejects_degenerate_sizes() {
    let df = df!(
        "VisualComplexity" => &[0.1],
        "ColorVariance" => &[0.1],
        "EdgeDensity" => &[0.1],
        "Brightness" => &[0.1],
        "Contrast" => &[0.1],
        "AspectRatio" => &[1.778],
        "ImportanceScore" => &[0.5]
    )
    .unwrap();
    let dataset = Dataset::from_dataframe(&df).unwrap();

    assert!(train_test_split(&dataset, 0.2, 42).is_err());
    assert!(split_indices(10, 1.0, 42).is_err());
}
