use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn apimextract(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("apimextract").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

const REQUIRED: [&str; 8] = [
    "--source-apim-name",
    "contoso",
    "--destination-apim-name",
    "contoso-prod",
    "--resource-group",
    "apim-rg",
    "--file-folder",
    "./templates",
];

#[test]
fn valid_flags_print_plan() {
    let dir = TempDir::new().unwrap();
    apimextract(&dir)
        .args(REQUIRED)
        .args(["--api-name", "echo-api", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode: single API (echo-api)"))
        .stdout(predicate::str::contains("Output folder: ./templates"));
}

#[test]
fn missing_parameter_exits_with_code_2() {
    let dir = TempDir::new().unwrap();
    apimextract(&dir)
        .args(["--source-apim-name", "contoso", "--output-format", "plain"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("destinationApimName"));
}

#[test]
fn conflicting_modes_exit_with_code_3() {
    let dir = TempDir::new().unwrap();
    apimextract(&dir)
        .args(REQUIRED)
        .args(["--api-name", "echo-api", "--api-version-set-name", "v1"])
        .args(["--output-format", "plain"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("apiName and apiVersionSetName"));
}

#[test]
fn json_config_file_with_output_override() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("extractor.json");
    fs::write(
        &config_path,
        r#"{
            "sourceApimName": "contoso",
            "destinationApimName": "contoso-prod",
            "resourceGroup": "apim-rg",
            "fileFolder": "./templates",
            "mutipleAPIs": "echo-api,petstore",
            "linkedTemplatesSasToken": "?sig=secret"
        }"#,
    )
    .unwrap();

    let output = apimextract(&dir)
        .args(["--config", "extractor.json", "--output", "./override"])
        .args(["--output-format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["type"], "plan");
    assert_eq!(plan["extractor"]["fileFolder"], "./override");
    assert_eq!(plan["extractor"]["sourceApimName"], "contoso");
    assert_eq!(plan["extractor"]["mode"]["kind"], "multiple_apis");
    assert_eq!(
        plan["extractor"]["mode"]["value"],
        serde_json::json!(["echo-api", "petstore"])
    );
    assert!(!String::from_utf8_lossy(&output.stdout).contains("secret"));
}

#[test]
fn default_config_file_is_discovered() {
    let dir = TempDir::new().unwrap();
    apimextract(&dir)
        .arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("apimextract.toml"));
    assert!(dir.path().join("apimextract.toml").exists());

    apimextract(&dir)
        .args(["--split-apis", "true", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode: split per API"));
}

#[test]
fn include_revisions_without_api_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    apimextract(&dir)
        .args(REQUIRED)
        .args(["--include-all-revisions", "true", "-q"])
        .assert()
        .code(3);
}

#[test]
fn verbose_json_output_is_one_value_per_line() {
    let dir = TempDir::new().unwrap();
    let output = apimextract(&dir)
        .args(REQUIRED)
        .args(["--multiple-apis", "echo-api,petstore", "--output-format", "json", "-vv"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let values: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert!(values.len() > 1);
    assert!(values.iter().any(|v| v["type"] == "message"));
    let plan = values.iter().find(|v| v["type"] == "plan").unwrap();
    assert_eq!(plan["extractor"]["mode"]["kind"], "multiple_apis");
}

#[test]
fn generated_json_config_is_loadable() {
    let dir = TempDir::new().unwrap();
    apimextract(&dir)
        .args(["--generate-config", "--config", "extractor.json"])
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("extractor.json")).unwrap();
    assert!(content.trim_start().starts_with('{'));

    apimextract(&dir)
        .args(["--config", "extractor.json", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Source: my-source-apim"));
}
