//! Settings persistence tests.

use std::fs;

use survey_analysis::{AnalysisType, ConfidenceLevel};
use survey_cli::settings::{OutputFormat, Settings, SettingsError};

#[test]
fn defaults_match_the_canvas() {
    let settings = Settings::default();
    let defaults = settings.analysis_defaults();
    assert_eq!(defaults.analysis_type, AnalysisType::Crosstab);
    assert_eq!(defaults.confidence_level, ConfidenceLevel::NinetyFive);
    assert!(!defaults.report.add_to_report);
    assert!(defaults.report.show_significance_tests);
    assert!(defaults.report.show_ai_interpretation);
    assert_eq!(settings.display.format, OutputFormat::Table);
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(
        &path,
        r#"
[analysis]
default_type = "t-test"

[report]
add_to_report = true
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(path.as_path())).unwrap();
    assert_eq!(settings.analysis.analysis_type, AnalysisType::TTest);
    assert_eq!(settings.analysis.confidence_level, ConfidenceLevel::NinetyFive);
    assert!(settings.report.add_to_report);
    assert!(settings.report.show_significance_tests);

    let defaults = settings.analysis_defaults();
    assert!(defaults.report.add_to_report);
}

#[test]
fn save_then_load_preserves_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config").join("settings.toml");

    let mut settings = Settings::default();
    settings.analysis.analysis_type = AnalysisType::Anova;
    settings.analysis.confidence_level = ConfidenceLevel::NinetyNine;
    settings.report.show_ai_interpretation = false;
    settings.display.format = OutputFormat::Json;
    settings.save_to(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("default_type = \"anova\""));
    assert!(content.contains("confidence_level = 99"));
    assert!(content.contains("format = \"json\""));

    assert_eq!(Settings::load_from(&path).unwrap(), settings);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = Settings::load(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, SettingsError::Read { .. }));
}

#[test]
fn invalid_values_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[analysis]\nconfidence_level = 80\n").unwrap();

    let err = Settings::load_from(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Parse { .. }));
    assert!(err.to_string().contains("settings.toml"));
}
