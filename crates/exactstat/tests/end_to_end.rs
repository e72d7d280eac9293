use exactstat::{
    AlternativeHypothesis, ContingencyTable, ErrorKind, InferenceConfig, StatError,
};
use tempfile::TempDir;

fn write_config(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn configured_tests_from_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_config(
        &dir,
        "greater.toml",
        "alternative = \"greater-than\"\n\n[interval]\nconfidence_level = 0.9\n",
    );
    let config = InferenceConfig::load(&path).unwrap();

    let fisher = config.fisher_exact_test().unwrap();
    let table = ContingencyTable::new(6, 2, 1, 4).unwrap();
    let result = fisher.test(&table).unwrap();
    assert!((result.p_value() - 0.08624708624708625).abs() < 1e-14);
    assert!(!result.reject(0.05).unwrap());

    let binomial = config.binomial_test().unwrap();
    assert_eq!(binomial.alternative(), AlternativeHypothesis::GreaterThan);
    let result = binomial.test(235, 51, 1.0 / 6.0).unwrap();
    assert!(result.reject(0.05).unwrap());

    let interval = config
        .clopper_pearson()
        .unwrap()
        .interval(235, 51, config.confidence_level().unwrap())
        .unwrap();
    assert!(interval.lower() > 1.0 / 6.0);
    assert!(interval.contains(51.0 / 235.0));
}

#[test]
fn missing_file_is_a_config_error() {
    let err = InferenceConfig::load("/nonexistent/exactstat.toml").unwrap_err();
    assert!(matches!(err, StatError::Config { .. }));
    assert!(err.to_string().contains("exactstat.toml"), "{err}");
}

#[test]
fn absent_alternative_in_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_config(&dir, "empty.toml", "");
    let config = InferenceConfig::load(&path).unwrap();
    assert_eq!(config.binomial_test().unwrap_err().kind(), ErrorKind::NullArgument);
}

#[test]
fn results_serialize_as_plain_records() {
    let table = ContingencyTable::new(6, 2, 1, 4).unwrap();
    let result = InferenceConfig::default()
        .fisher_exact_test()
        .unwrap()
        .test(&table)
        .unwrap();
    let json = serde_json::to_value(result).unwrap();
    assert_eq!(json["statistic"], 12.0);
    assert!(json["p_value"].as_f64().unwrap() > 0.1);

    let interval = InferenceConfig::default()
        .clopper_pearson()
        .unwrap()
        .interval(10, 3, 0.95)
        .unwrap();
    let json = serde_json::to_value(interval).unwrap();
    assert_eq!(json["confidence_level"], 0.95);
    assert!(json["lower"].as_f64().unwrap() < json["upper"].as_f64().unwrap());
}
