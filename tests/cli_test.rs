use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// 在隔离的目录中运行二进制
///
/// 目录里没有配置文件时写入一个空的 planreport.toml，
/// 这样查找会停在该目录，不会读到父目录或用户目录中的配置。
fn planreport(dir: &Path, args: &[&str]) -> Output {
    let config = dir.join("planreport.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }

    Command::new(env!("CARGO_BIN_EXE_planreport"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

#[test]
fn test_default_paths_in_working_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::copy(fixture("test_list.yaml"), temp_dir.path().join("test_list.yaml")).unwrap();
    fs::copy(
        fixture("result_test_auto.json"),
        temp_dir.path().join("result_test_auto.json"),
    )
    .unwrap();

    let output = planreport(temp_dir.path(), &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Reading automated results from result_test_auto.json… OK"));
    assert!(stdout.contains(
        "Reading browser results from result_test_selenium.json… not found, browser tests have not been run yet"
    ));
    assert!(stdout.contains("TA11 | auto-selenium | 🕳Not found\n"));
    assert!(stdout.contains("Number of tests: 11\n"));
    assert!(stdout.ends_with("✅Passed + 🫱Manual: 4 (36.4%)\n"));
}

#[test]
fn test_missing_plan_is_fatal() {
    let temp_dir = TempDir::new().unwrap();

    let output = planreport(temp_dir.path(), &["--plan", "nowhere.yaml"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("nowhere.yaml"));
}

#[test]
fn test_unreadable_plan_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("test_list.yaml")).unwrap();

    let output = planreport(temp_dir.path(), &[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("test_list.yaml"));
}

#[test]
fn test_user_config_is_isolated() {
    let temp_dir = TempDir::new().unwrap();
    let user_config = temp_dir.path().join(".config/planreport");
    fs::create_dir_all(&user_config).unwrap();
    fs::write(
        user_config.join("planreport.toml"),
        "[paths]\nplan = \"elsewhere.yaml\"\n",
    )
    .unwrap();
    fs::copy(fixture("test_list.yaml"), temp_dir.path().join("test_list.yaml")).unwrap();

    // 工作目录中的空配置优先于用户目录
    let output = planreport(temp_dir.path(), &[]);
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains("Number of tests: 11\n"));
}

#[test]
fn test_invalid_result_export_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let broken = temp_dir.path().join("broken.json");
    fs::write(&broken, "{ \"tests\": [").unwrap();

    let plan = fixture("test_list.yaml");
    let output = planreport(
        temp_dir.path(),
        &["-p", plan.to_str().unwrap(), "-a", broken.to_str().unwrap()],
    );
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_config_file_and_json_export() {
    let temp_dir = TempDir::new().unwrap();
    let config = format!(
        "[paths]\nplan = {:?}\nautomated = {:?}\nbrowser = {:?}\n",
        fixture("test_list.yaml").display().to_string(),
        fixture("result_test_auto.json").display().to_string(),
        fixture("result_test_selenium.json").display().to_string(),
    );
    fs::write(temp_dir.path().join("planreport.toml"), config).unwrap();

    let output = planreport(temp_dir.path(), &["--json", "out/report.json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("TA12 | auto-selenium | ❌Failed\n"));
    assert!(stdout.ends_with("✅Passed + 🫱Manual: 5 (45.5%)\n"));

    let json = fs::read_to_string(temp_dir.path().join("out/report.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["summary"]["total"], 11);
    assert_eq!(value["summary"]["skipped"], 1);
    assert_eq!(value["cases"][3]["status"], "error");
    assert_eq!(value["cases"][3]["classification"], "failed");
}

#[test]
fn test_empty_plan_reports_zero_percentages() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("test_list.yaml"), "# nothing planned yet\n").unwrap();

    let output = planreport(temp_dir.path(), &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("\nNumber of tests: 0\n✅Passed tests: 0 (0.0%)\n"));
}
