//! End-to-end tests for the `resource-switcher` binary against the fixtures
//! in `docs/fixtures`.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
        .canonicalize()
        .expect("fixture present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("resource-switcher");
    cmd.env("RUST_LOG", "error")
        .env_remove("RESOURCE_SWITCHER_RESOURCES")
        .env_remove("RESOURCE_SWITCHER_PARTS")
        .arg("--resources")
        .arg(fixture("resources.csv"))
        .arg("--parts")
        .arg(fixture("switchers.json"));
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("run binary");
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf-8 output")
}

#[test]
fn resources_lists_catalog() {
    cli()
        .arg("resources")
        .assert()
        .success()
        .stdout(contains("Available resources (7):"))
        .stdout(contains("Liquid Fuel"))
        .stdout(contains("XenonGas"));
}

#[test]
fn resources_resolved_from_environment() {
    let mut cmd = cargo_bin_cmd!("resource-switcher");
    cmd.env("RUST_LOG", "error")
        .env("RESOURCE_SWITCHER_RESOURCES", fixture("resources.csv"))
        .arg("resources")
        .assert()
        .success()
        .stdout(contains("Available resources (7):"));
}

#[test]
fn missing_resources_file_fails_with_context() {
    let dir = tempdir().expect("create temp dir");
    let mut cmd = cargo_bin_cmd!("resource-switcher");
    cmd.env("RUST_LOG", "error")
        .arg("--resources")
        .arg(dir.path().join("absent.csv"))
        .arg("resources")
        .assert()
        .failure()
        .stderr(contains("failed to load resource catalog"));
}

#[test]
fn switchers_for_owner_are_listed_by_display_name() {
    let stdout = stdout_of(cli().args(["switchers", "--owner", "1"]));

    let positions: Vec<usize> = ["empty-bay", "ore-bin", "tank-1", "tank-2"]
        .iter()
        .map(|id| stdout.find(id).unwrap_or_else(|| panic!("{id} missing")))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(!stdout.contains("pod"));
    assert!(stdout.contains("Disabled: bad-volume"));
}

#[test]
fn switchers_for_unknown_owner_reports_empty_scope() {
    cli()
        .args(["switchers", "--owner", "99"])
        .assert()
        .success()
        .stdout(contains("No switchers in scope."));
}

#[test]
fn loadouts_show_disabled_reasons() {
    cli()
        .args(["loadouts", "--switcher", "tank-1"])
        .assert()
        .success()
        .stdout(contains("Loadouts for Rocket Tank (tank-1):"))
        .stdout(contains("Liquid Fuel | Oxidizer"))
        .stdout(contains("disabled: loadout overfilled has invalid resource ratios"))
        .stdout(contains("disabled: no resource definition found for XenonGass"));
}

#[test]
fn unknown_switcher_suggests_close_ids() {
    cli()
        .args(["loadouts", "--switcher", "tank-l"])
        .assert()
        .failure()
        .stderr(contains("unknown switcher: tank-l"))
        .stderr(contains("Did you mean"));
}

#[test]
fn preview_reports_breakdown_and_swap_cost() {
    cli()
        .args(["preview", "--switcher", "tank-1", "--loadout", "lfo"])
        .assert()
        .success()
        .stdout(contains("Fuel + Oxidizer on Rocket Tank"))
        .stdout(contains("Liquid Fuel"))
        .stdout(contains("Oxidizer"))
        .stdout(contains("Swap cost: 160.00"));
}

#[test]
fn preview_of_disabled_loadout_fails() {
    cli()
        .args(["preview", "--switcher", "tank-1", "--loadout", "overfilled"])
        .assert()
        .failure()
        .stderr(contains("is disabled"));
}

#[test]
fn preview_json_includes_breakdown() {
    let stdout = stdout_of(cli().args([
        "--format",
        "json",
        "preview",
        "--switcher",
        "tank-1",
        "--loadout",
        "lfo",
    ]));
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["switcher"], "tank-1");
    assert_eq!(value["breakdown"].as_array().map(Vec::len), Some(2));
    let cost = value["swap_cost"].as_f64().expect("numeric cost");
    assert!((cost - 160.0).abs() < 1e-9);
}

#[test]
fn apply_writes_state_and_reports_container() {
    let dir = tempdir().expect("create temp dir");
    let state = dir.path().join("state").join("selections.json");

    cli()
        .args(["apply", "--switcher", "tank-1", "--loadout", "lfo", "--state"])
        .arg(&state)
        .assert()
        .success()
        .stdout(contains("Applied lfo to tank-1"))
        .stdout(contains("Container tank-1:"))
        .stdout(contains("60.00 / 120.00"))
        .stdout(contains("Swap cost: 160.00"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&state).expect("state written"))
            .expect("valid json");
    let entries = saved.as_array().expect("array of selections");
    let tank = entries
        .iter()
        .find(|entry| entry["switcher_id"] == "tank-1")
        .expect("tank-1 saved");
    assert_eq!(tank["current_loadout"], 0);
}

#[test]
fn apply_without_symmetry_leaves_counterpart_alone() {
    let stdout = stdout_of(cli().args(["apply", "--switcher", "tank-1", "--loadout", "lf"]));
    assert!(stdout.contains("Container tank-1:"));
    assert!(!stdout.contains("tank-2"));
}

#[test]
fn apply_with_symmetry_updates_counterparts() {
    cli()
        .args([
            "apply",
            "--switcher",
            "tank-1",
            "--loadout",
            "lfo",
            "--symmetry",
        ])
        .assert()
        .success()
        .stdout(contains("Container tank-2:"))
        .stdout(contains("Symmetry counterparts: tank-2"));
}

#[test]
fn info_shows_part_info_and_restored_cost() {
    cli()
        .args(["info", "--switcher", "tank-1"])
        .assert()
        .success()
        .stdout(contains("Volume: 200"))
        .stdout(contains("25 MaterialKits"))
        .stdout(contains(" - Liquid Fuel: 60%"));

    cli()
        .args(["info", "--switcher", "pod"])
        .assert()
        .success()
        .stdout(contains("cost 6000.00"));
}
