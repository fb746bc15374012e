/// End-to-end tests for the prediction pipeline loaded from artifact files.
///
/// Each test writes a small artifact directory (model, schema, optional
/// scaler and metadata) into a temp dir and bootstraps a predictor from it.
use std::path::Path;

use salary_inference::{
    Error, ExperienceValue, Predictor, PredictorConfig, PredictorHandle, RawInputRecord,
    SalaryCategory,
};

const FEATURES: &str = r#"[
    "experience_years",
    "position_level_encoded",
    "skills_count",
    "has_skill_python",
    "has_skill_sql",
    "city_hồ_chí_minh",
    "city_hà_nội",
    "exp_position_interaction"
]"#;

/// 5 + 2*experience + 1*position + 0.5*skills + 3*python + 2*hcm
const LINEAR_MODEL: &str = r#"{
    "type": "linear",
    "intercept": 5.0,
    "coefficients": [2.0, 1.0, 0.5, 3.0, 0.0, 2.0, 0.0, 0.0],
    "n_features": 8
}"#;

/// Splits on experience_years (slot 0) at 3.0.
const FOREST_MODEL: &str = r#"{
    "type": "random_forest",
    "n_features": 8,
    "trees": [
        {"nodes": [
            {"feature": 0, "threshold": 3.0, "left": 1, "right": 2},
            {"value": 8.0},
            {"value": 20.0}
        ]},
        {"nodes": [
            {"feature": 0, "threshold": 3.0, "left": 1, "right": 2},
            {"value": 12.0},
            {"value": 30.0}
        ]}
    ]
}"#;

const MODEL_INFO: &str = r#"{
    "model_type": "LinearRegression",
    "test_mae": 3.0,
    "test_rmse": 4.2,
    "test_r2": 0.58,
    "best_params": {"fit_intercept": true}
}"#;

fn write_artifacts(dir: &Path, model: &str, with_scaler: bool, with_info: bool) {
    std::fs::write(dir.join("best_model.json"), model).unwrap();
    std::fs::write(dir.join("features_list.json"), FEATURES).unwrap();
    if with_scaler {
        std::fs::write(
            dir.join("scaler.json"),
            r#"{"mean": [0,0,0,0,0,0,0,0], "scale": [1,1,1,1,1,1,1,1]}"#,
        )
        .unwrap();
    }
    if with_info {
        std::fs::write(dir.join("model_info.json"), MODEL_INFO).unwrap();
    }
}

fn record(experience: &str, position: &str, city: &str, skills: &str) -> RawInputRecord {
    RawInputRecord {
        job_title: Some("Data Analyst".to_string()),
        city: Some(city.to_string()),
        experience: Some(ExperienceValue::Label(experience.to_string())),
        position_level: Some(position.to_string()),
        skills: Some(skills.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_full_pipeline_with_linear_model() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path(), LINEAR_MODEL, true, true);

    let predictor = Predictor::load(&PredictorConfig::from_dir(dir.path())).unwrap();
    assert!(predictor.has_scaler());

    let raw = record("2-5 năm", "Nhân viên", "Hồ Chí Minh", "Python, SQL");
    let result = predictor.predict_with_details(&raw).unwrap();

    // 5 + 2*3.5 + 3 + 0.5*2 + 3 + 2
    assert_eq!(result.predicted_salary, 21.0);
    assert_eq!(result.salary_category, SalaryCategory::UpperMiddle);
    assert_eq!(result.confidence_interval.lower, 18.0);
    assert_eq!(result.confidence_interval.upper, 24.0);
    assert_eq!(result.model_info.model_type, "LinearRegression");
    assert_eq!(result.model_info.r2, 0.58);
    assert_eq!(result.input_summary.skills_count, 2);
}

#[test]
fn test_forest_model_averages_trees() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path(), FOREST_MODEL, false, true);
    let predictor = Predictor::load(&PredictorConfig::from_dir(dir.path())).unwrap();

    let junior = predictor
        .predict(&record("1-2 năm", "Nhân viên", "Hà Nội", "Excel"))
        .unwrap();
    let senior = predictor
        .predict(&record("5-10 năm", "Nhân viên", "Hà Nội", "Excel"))
        .unwrap();
    assert_eq!(junior, 10.0);
    assert_eq!(senior, 25.0);
}

#[test]
fn test_missing_optional_artifacts_degrade() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path(), LINEAR_MODEL, false, false);

    let handle = PredictorHandle::bootstrap(&PredictorConfig::from_dir(dir.path()));
    assert!(handle.is_ready());

    let predictor = handle.predictor().unwrap();
    assert!(!predictor.has_scaler());

    let result = handle
        .predict_with_details(&record("2-5 năm", "Nhân viên", "Hà Nội", "SQL"))
        .unwrap();
    assert_eq!(result.model_info.mae, 0.0);
    assert_eq!(result.model_info.model_type, "LinearRegression");
    assert_eq!(
        result.confidence_interval.lower,
        result.confidence_interval.upper
    );

    let info = serde_json::to_value(handle.model_info().unwrap()).unwrap();
    assert_eq!(info["model_type"], "N/A");
    assert_eq!(info["test_mae"], "N/A");
    assert_eq!(info["n_features"], 8);
}

#[test]
fn test_missing_model_is_permanently_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("features_list.json"), FEATURES).unwrap();

    let handle = PredictorHandle::bootstrap(&PredictorConfig::from_dir(dir.path()));
    assert!(!handle.is_ready());

    // Writing the model afterwards does not revive the handle.
    std::fs::write(dir.path().join("best_model.json"), LINEAR_MODEL).unwrap();
    let err = handle
        .predict_with_details(&record("2-5 năm", "Nhân viên", "Hà Nội", ""))
        .unwrap_err();
    assert!(matches!(err, Error::ModelUnavailable(_)));
}

#[test]
fn test_missing_schema_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("best_model.json"), LINEAR_MODEL).unwrap();

    let handle = PredictorHandle::bootstrap(&PredictorConfig::from_dir(dir.path()));
    assert!(handle
        .unavailable_reason()
        .unwrap()
        .contains("features_list.json"));
}

#[test]
fn test_schema_drift_fails_per_request() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path(), LINEAR_MODEL, false, false);
    std::fs::write(
        dir.path().join("features_list.json"),
        r#"["experience_years", "skills_count"]"#,
    )
    .unwrap();

    let handle = PredictorHandle::bootstrap(&PredictorConfig::from_dir(dir.path()));
    assert!(handle.is_ready());

    let err = handle
        .predict_with_details(&record("2-5 năm", "Nhân viên", "Hà Nội", ""))
        .unwrap_err();
    assert!(matches!(err, Error::Inference(_)));
    assert!(err.to_string().contains("shape mismatch"));
}

#[test]
fn test_unseen_categories_still_predict() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path(), LINEAR_MODEL, false, false);
    let predictor = Predictor::load(&PredictorConfig::from_dir(dir.path())).unwrap();

    let raw = record("2-5 năm", "Phi hành gia", "Atlantis", "Telepathy, Alchemy");
    let vector = predictor.encode(&raw).unwrap();
    assert_eq!(vector.len(), 8);
    assert_eq!(vector.values(), &[3.5, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

    // 5 + 2*3.5 + 0.5*2
    assert_eq!(predictor.predict(&raw).unwrap(), 13.0);
}

#[test]
fn test_batch_is_order_preserving() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path(), LINEAR_MODEL, false, true);
    let predictor = Predictor::load(&PredictorConfig::from_dir(dir.path())).unwrap();

    let records = vec![
        record("Không yêu cầu", "Thực tập sinh", "Hà Nội", ""),
        record("5-10 năm", "Giám đốc", "Hồ Chí Minh", "Python"),
        record("2-5 năm", "Nhân viên", "Hà Nội", "SQL"),
    ];
    let batch = predictor.predict_batch(&records).unwrap();
    let singles: Vec<f64> = records
        .iter()
        .map(|r| predictor.predict_with_details(r).unwrap().predicted_salary)
        .collect();

    assert_eq!(batch, singles);
    assert!(batch[1] > batch[2] && batch[2] > batch[0]);
}
