//! Tests for the persisted pipeline artifact

use cardseg::pipeline::*;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_save_and_load_preserves_predictions() {
    let pipeline = create_fitted_pipeline();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pipeline.json");

    pipeline.save(&path).unwrap();
    let loaded = SegmentationPipeline::load(&path).unwrap();

    assert!(loaded.is_fitted());
    assert_eq!(loaded.stages(), pipeline.stages());
    assert_eq!(loaded.model(), pipeline.model());

    let df = create_reference_dataframe();
    assert_eq!(loaded.predict(&df).unwrap(), pipeline.predict(&df).unwrap());
    assert_eq!(
        loaded.predict_one(sample_customer()).unwrap(),
        pipeline.predict_one(sample_customer()).unwrap()
    );
}

#[test]
fn test_artifact_layout() {
    let pipeline = create_fitted_pipeline();
    let json = PipelineArtifact::from_pipeline(&pipeline)
        .unwrap()
        .to_json()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["format_version"], FORMAT_VERSION);
    assert!(value["created_at"].is_string());

    let stages = value["stages"].as_array().unwrap();
    let names: Vec<&str> = stages
        .iter()
        .map(|s| s["stage"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["imputer", "purchase_reconciler", "monetary_aggregator"]
    );

    let stats = &stages[0]["statistics"];
    assert_eq!(stats["credit_limit_median"], 2500.0);
    assert_eq!(stats["min_payments_median"], 25.0);
    assert_eq!(stats["modes"]["TENURE"], 12.0);
    assert_eq!(stats["medians"]["CASH_ADVANCE"], 125.0);

    assert_eq!(stages[1]["rtol"], DEFAULT_RTOL);
    assert_eq!(stages[1]["atol"], DEFAULT_ATOL);

    assert_eq!(value["model"]["centroids"].as_array().unwrap().len(), 4);
}

#[test]
fn test_unfitted_pipeline_cannot_be_saved() {
    let pipeline = SegmentationPipeline::new(create_test_model());
    let temp_dir = TempDir::new().unwrap();

    let result = pipeline.save(&temp_dir.path().join("pipeline.json"));

    assert!(matches!(result, Err(PipelineError::NotFitted)));
}

#[test]
fn test_unknown_version_is_rejected() {
    let pipeline = create_fitted_pipeline();
    let mut artifact = PipelineArtifact::from_pipeline(&pipeline).unwrap();
    artifact.format_version = FORMAT_VERSION + 1;

    let err = artifact.into_pipeline().unwrap_err();

    assert!(
        matches!(err, PipelineError::UnsupportedVersion { found, supported }
            if found == FORMAT_VERSION + 1 && supported == FORMAT_VERSION),
        "unexpected error: {:?}",
        err
    );
}

#[test]
fn test_unfitted_imputer_in_artifact_is_rejected() {
    let pipeline = create_fitted_pipeline();
    let mut artifact = PipelineArtifact::from_pipeline(&pipeline).unwrap();
    artifact.stages[0] = Stage::Imputer(Imputer::new());

    let err = artifact.into_pipeline().unwrap_err();

    assert!(matches!(err, PipelineError::Artifact(_)), "unexpected error: {:?}", err);
}

#[test]
fn test_wrong_stage_sequence_is_rejected() {
    let pipeline = create_fitted_pipeline();
    let artifact = PipelineArtifact::from_pipeline(&pipeline).unwrap();
    let imputer = artifact.stages[0].clone();
    let reconciler = artifact.stages[1].clone();
    let aggregator = artifact.stages[2].clone();

    let sequences = vec![
        vec![aggregator.clone()],
        vec![],
        vec![reconciler.clone(), imputer.clone(), aggregator.clone()],
        vec![imputer.clone(), reconciler.clone()],
        vec![
            imputer.clone(),
            reconciler.clone(),
            aggregator.clone(),
            aggregator.clone(),
        ],
    ];

    for stages in sequences {
        let mut broken = artifact.clone();
        broken.stages = stages.clone();
        let err = broken.into_pipeline().unwrap_err();
        assert!(
            matches!(err, PipelineError::Artifact(_)),
            "{:?} gave {:?}",
            stages,
            err
        );
    }
}

#[test]
fn test_reordered_pipeline_cannot_be_saved() {
    let mut pipeline = SegmentationPipeline::with_stages(
        vec![
            Stage::PurchaseReconciler(PurchaseReconciler::default()),
            Stage::Imputer(Imputer::new()),
            Stage::MonetaryAggregator(MonetaryAggregator::new()),
        ],
        create_test_model(),
    );
    pipeline.fit(&create_reference_dataframe()).unwrap();

    let result = PipelineArtifact::from_pipeline(&pipeline);

    assert!(matches!(result, Err(PipelineError::Artifact(_))));
}

#[test]
fn test_incomplete_statistics_are_rejected() {
    let pipeline = create_fitted_pipeline();
    let mut value: serde_json::Value = serde_json::from_str(
        &PipelineArtifact::from_pipeline(&pipeline)
            .unwrap()
            .to_json()
            .unwrap(),
    )
    .unwrap();
    value["stages"][0]["statistics"]["medians"]
        .as_object_mut()
        .unwrap()
        .remove("PAYMENTS");

    let artifact = PipelineArtifact::from_json(&value.to_string()).unwrap();
    let err = artifact.into_pipeline().unwrap_err();

    assert!(matches!(err, PipelineError::Artifact(_)), "unexpected error: {:?}", err);
}

#[test]
fn test_invalid_model_in_artifact_is_rejected() {
    let pipeline = create_fitted_pipeline();
    let mut value: serde_json::Value = serde_json::from_str(
        &PipelineArtifact::from_pipeline(&pipeline)
            .unwrap()
            .to_json()
            .unwrap(),
    )
    .unwrap();
    value["model"]["centroids"] = serde_json::json!([]);

    let artifact = PipelineArtifact::from_json(&value.to_string()).unwrap();
    let err = artifact.into_pipeline().unwrap_err();

    assert!(matches!(err, PipelineError::Model(_)), "unexpected error: {:?}", err);
}

#[test]
fn test_malformed_json_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{ \"format_version\": 1, ").unwrap();

    let result = SegmentationPipeline::load(&path);

    assert!(matches!(result, Err(PipelineError::Json(_))));
}

#[test]
fn test_missing_artifact_file() {
    let result = SegmentationPipeline::load(std::path::Path::new("/nonexistent/pipeline.json"));
    assert!(matches!(result, Err(PipelineError::Io(_))));
}

#[test]
fn test_model_json_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("model.json");
    std::fs::write(&path, test_model_json()).unwrap();

    let model = CentroidModel::from_json_file(&path).unwrap();

    assert_eq!(model, create_test_model());
}
