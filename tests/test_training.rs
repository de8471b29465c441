//! Integration test: forest training on frame data

use frame_importance::data::{create_sample_data, train_test_split, Dataset};
use frame_importance::training::{
    ForestConfig, MaxFeatures, RandomForest, RegressionMetrics, TrainEngine,
};
use ndarray::{Array1, Array2};

fn sample_split() -> (Dataset, Dataset) {
    let dataset = Dataset::from_dataframe(&create_sample_data().unwrap()).unwrap();
    train_test_split(&dataset, 0.2, 42).unwrap()
}

fn quick_config() -> ForestConfig {
    ForestConfig::default().with_n_estimators(25)
}

#[test]
fn test_engine_reports_all_features() {
    let (train, test) = sample_split();
    let mut engine = TrainEngine::new(quick_config());

    let report = engine.fit(&train, &test).unwrap();

    assert_eq!(report.n_trees, 25);
    assert_eq!(report.feature_importances.len(), 6);
    let total: f64 = report.feature_importances.iter().map(|f| f.importance).sum();
    assert!((total - 1.0).abs() < 1e-9, "importances sum to {}", total);
    assert!(report
        .feature_importances
        .windows(2)
        .all(|w| w[0].importance >= w[1].importance));
}

#[test]
fn test_constant_feature_has_no_importance() {
    let (train, test) = sample_split();
    let mut engine = TrainEngine::new(quick_config());

    let report = engine.fit(&train, &test).unwrap();

    let aspect = report
        .feature_importances
        .iter()
        .find(|f| f.name == "AspectRatio")
        .unwrap();
    assert_eq!(aspect.importance, 0.0);
    assert_eq!(report.feature_importances.last().unwrap().name, "AspectRatio");
}

#[test]
fn test_forest_learns_sample_scores() {
    let (train, test) = sample_split();
    let mut engine = TrainEngine::new(quick_config());

    let report = engine.fit(&train, &test).unwrap();

    assert!(report.train_metrics.r2 > report.test_metrics.r2 - 0.05);
    assert!(report.test_metrics.r2 > 0.1, "test R² {}", report.test_metrics.r2);
    assert!(report.test_metrics.mse < 0.02, "test MSE {}", report.test_metrics.mse);
    assert_eq!(report.train_metrics.n_samples, 800);
    assert_eq!(report.test_metrics.n_samples, 200);
}

#[test]
fn test_training_is_deterministic() {
    let (train, test) = sample_split();

    let mut a = TrainEngine::new(quick_config());
    let mut b = TrainEngine::new(quick_config().with_n_jobs(2));
    let report_a = a.fit(&train, &test).unwrap().clone();
    let report_b = b.fit(&train, &test).unwrap().clone();

    assert_eq!(report_a.feature_importances, report_b.feature_importances);
    assert_eq!(report_a.test_metrics.mse, report_b.test_metrics.mse);
    assert_eq!(
        a.predict(&test.features).unwrap(),
        b.predict(&test.features).unwrap()
    );
}

#[test]
fn test_predictions_stay_within_target_range() {
    let (train, test) = sample_split();
    let mut model = RandomForest::new(quick_config().with_max_features(MaxFeatures::Sqrt));
    model.fit(&train.features, &train.target).unwrap();

    let predictions = model.predict(&test.features).unwrap();

    assert_eq!(predictions.len(), test.n_samples());
    assert!(predictions.iter().all(|&p| (0.0..=1.0).contains(&p)));
}

#[test]
fn test_predict_rejects_wrong_width() {
    let (train, _) = sample_split();
    let mut model = RandomForest::new(quick_config().with_n_estimators(3));
    model.fit(&train.features, &train.target).unwrap();

    assert!(model.predict(&Array2::zeros((4, 5))).is_err());
}

#[test]
fn test_metrics_of_perfect_predictions() {
    let y = Array1::from_vec(vec![0.1, 0.4, 0.6, 0.9]);
    let metrics = RegressionMetrics::compute(&y, &y).unwrap();

    assert_eq!(metrics.mse, 0.0);
    assert_eq!(metrics.mae, 0.0);
    assert_eq!(metrics.r2, 1.0);
}
