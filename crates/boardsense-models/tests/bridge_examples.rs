//! End-to-end behaviour of the predictor over a models directory

mod common;

use boardsense_core::PredictionResult;
use boardsense_models::{ModelAlias, ModelRegistry, Predictor};

#[test]
fn test_mlp_prediction_with_confidence() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "best_mlp.json", &common::mlp_pipeline());
    let mut predictor = Predictor::new(ModelRegistry::new(dir.path()));

    let result = predictor.predict("mlp", "x,o,b,x,o,b,x,b,b");
    let PredictionResult::Success {
        model,
        prediction_int,
        prediction_label,
        confidence,
    } = result
    else {
        panic!("expected a prediction, got {:?}", result);
    };

    assert_eq!(model, "mlp");
    assert_eq!(prediction_int, 0);
    assert_eq!(prediction_label, "Has Game");
    let confidence = confidence.expect("mlp exposes probabilities through its pipeline");
    assert!((0.5..=1.0).contains(&confidence));
}

#[test]
fn test_missing_alias_document() {
    let dir = tempfile::tempdir().unwrap();
    let mut predictor = Predictor::new(ModelRegistry::new(dir.path()));

    let result = predictor.predict("svm", "x,o,b,x,o,b,x,b,b");
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"model":"svm","error":"model 'svm' not found"}"#
    );

    // Known alias, no file: same shape, no prediction_int.
    let value = serde_json::to_value(predictor.predict("knn", "x,o,b,x,o,b,x,b,b")).unwrap();
    assert!(value.get("error").is_some());
    assert!(value.get("prediction_int").is_none());
}

#[test]
fn test_info_lists_present_aliases_in_order() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "knn.json", "{}");
    common::write(dir.path(), "rf.json", &common::forest_pipeline());
    let registry = ModelRegistry::new(dir.path());

    assert_eq!(
        registry.list_available(),
        vec![ModelAlias::RandomForest, ModelAlias::Knn]
    );
}

#[test]
fn test_short_board_document() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "knn.json", &common::forest_pipeline());
    let mut predictor = Predictor::new(ModelRegistry::new(dir.path()));

    let result = predictor.predict("knn", "x,o,b,x");
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"model":"knn","error":"board must contain 9 comma-separated positions"}"#
    );
}

#[test]
fn test_forest_confidence_follows_the_centre_cell() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "random_forest.json", &common::forest_pipeline());
    let mut predictor = Predictor::new(ModelRegistry::new(dir.path()));

    // Blank centre: trees give [5/6, 1/6, 0] and [1/4, 1/4, 1/2].
    let result = predictor.predict("random_forest", "x,o,x,o,b,x,o,x,o");
    let confidence = result.confidence().unwrap();
    assert_eq!(
        result,
        PredictionResult::success("random_forest", 0, Some(confidence))
    );
    assert!((confidence - (5.0 / 6.0 + 0.25) / 2.0).abs() < 1e-12);

    // Occupied centre: [0, 1/2, 1/2] and [1/4, 1/4, 1/2] put class 2 ahead.
    let result = predictor.predict("random_forest", "b,b,b,b,x,b,b,b,b");
    assert_eq!(
        result,
        PredictionResult::success("random_forest", 2, Some(0.5))
    );
}

#[test]
fn test_direct_model_without_probabilities_has_null_confidence() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "dt.json", &common::direct_svc());
    let mut predictor = Predictor::new(ModelRegistry::new(dir.path()));

    let result = predictor.predict("decision_tree", "0,0,3,0,0,0,0,0,0");
    assert_eq!(result, PredictionResult::success("decision_tree", 2, None));
    assert!(serde_json::to_string(&result)
        .unwrap()
        .ends_with(r#""confidence":null}"#));

    // Symbols cannot be read as numbers by a bare estimator.
    assert!(predictor.predict("decision_tree", "x,o,b,x,o,b,x,b,b").is_error());
}

#[test]
fn test_unmapped_class_is_unknown_with_its_own_confidence() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "dt.json", &common::direct_unlabelled_tree());
    let mut predictor = Predictor::new(ModelRegistry::new(dir.path()));

    let result = predictor.predict("decision_tree", "0,0,0,0,0,0,0,0,0");
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"model":"decision_tree","prediction_int":7,"prediction_label":"Unknown","confidence":0.9}"#
    );
}

#[test]
fn test_confidence_belongs_to_the_predicted_class() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "dt.json", &common::direct_offset_tree());
    let mut predictor = Predictor::new(ModelRegistry::new(dir.path()));

    let result = predictor.predict("decision_tree", "0,0,0,0,0,0,0,0,0");
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"model":"decision_tree","prediction_int":1,"prediction_label":"Possible End of Game","confidence":0.9}"#
    );
}

#[test]
fn test_repeated_predictions_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "mlp.json", &common::mlp_pipeline());
    let mut predictor = Predictor::new(ModelRegistry::new(dir.path()));

    let first = serde_json::to_vec(&predictor.predict("mlp", "x,o,b,x,o,b,x,b,b")).unwrap();
    let second = serde_json::to_vec(&predictor.predict("mlp", "x,o,b,x,o,b,x,b,b")).unwrap();
    assert_eq!(first, second);
}
