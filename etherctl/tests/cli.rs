use assert_cmd::cargo::cargo_bin_cmd;
use ether_core::CardId;
use serde_json::Value;
use tempfile::TempDir;

fn run(dir: &TempDir, args: &[&str]) -> Value {
    let mut cmd = cargo_bin_cmd!("etherctl");
    let output = cmd
        .current_dir(dir.path())
        .env_remove("ETHER_SCENE_CONFIG_PATH")
        .env_remove("ETHER_SCENE_CONFIG_JSON")
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("stdout is JSON")
}

fn card(name: &str) -> Value {
    Value::String(CardId::from_name(name).to_string())
}

#[test]
fn help_lists_subcommands() {
    let mut cmd = cargo_bin_cmd!("etherctl");
    let output = cmd.arg("--help").assert().success().get_output().stdout.clone();
    let text = String::from_utf8_lossy(&output);
    for sub in ["layout", "scroll", "config"] {
        assert!(text.contains(sub), "help missing '{sub}'");
    }

    let mut cmd = cargo_bin_cmd!("etherctl");
    let output = cmd
        .args(["scroll", "--help"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&output);
    assert!(text.contains("--steps"), "scroll help missing --steps");
    assert!(text.contains("--cards"), "scroll help missing --cards");
}

#[test]
fn layout_prints_initial_snapshot() {
    let dir = TempDir::new().unwrap();
    let report = run(&dir, &["layout", "--cards", "7"]);

    let snapshot = &report["snapshot"];
    assert_eq!(snapshot["priority"], serde_json::json!([3, 4, 2, 5, 1, 6, 0]));
    assert_eq!(snapshot["visible_window"]["start"], 1);
    assert_eq!(snapshot["visible_window"]["end"], 6);
    assert_eq!(snapshot["focused"], card("top-3"));
    assert_eq!(report["settings_source"], "defaults");
    assert_eq!(report["cards"].as_array().map(Vec::len), Some(7));
}

#[test]
fn scroll_moves_focus_both_ways() {
    let dir = TempDir::new().unwrap();
    let report = run(&dir, &["scroll", "--cards", "7", "--steps", "2"]);
    assert_eq!(report["snapshot"]["focused"], card("top-5"));

    let report = run(
        &dir,
        &["scroll", "--cards", "5", "--steps", "-1", "--row", "bottom"],
    );
    assert_eq!(report["row"], "bottom");
    assert_eq!(report["snapshot"]["focused"], card("bottom-1"));
}

#[test]
fn config_reports_file_source() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("ether.toml"), "row_margin = 21.0\n").unwrap();

    let report = run(&dir, &["config"]);
    assert_eq!(report["settings"]["row_margin"], 21.0);
    assert_eq!(report["source"], "ether.toml");
    assert_eq!(report["env_file_loaded"], false);
}

#[test]
fn invalid_settings_fail() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("ether.json"),
        r#"{"top": {"scale_factor": -1.0}}"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("etherctl");
    cmd.current_dir(dir.path())
        .env_remove("ETHER_SCENE_CONFIG_PATH")
        .env_remove("ETHER_SCENE_CONFIG_JSON")
        .arg("config")
        .assert()
        .failure();
}
