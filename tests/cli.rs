use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const STROKES: &str = r##"[
    {
        "path": {"id": 7, "color": "#0000ff", "width": 2.0, "data": ["10.00,20.00", "150.00,300.00"]},
        "size": {"width": 150.0, "height": 300.0},
        "drawer": "remote"
    }
]"##;

const LINE_GESTURE: &str = r#"[
    {"phase": "start", "x": 0, "y": 0},
    {"phase": "update", "x": 50, "y": 0},
    {"phase": "update", "x": 100, "y": 0},
    {"phase": "end", "x": 100, "y": 0}
]"#;

fn strokecanvas_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("strokecanvas").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home).env_remove("RUST_LOG");
    cmd
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn help_prints_about() {
    let temp = TempDir::new().unwrap();
    strokecanvas_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Stroke capture and eraser engine for drawing surfaces",
        ));
}

#[test]
fn no_arguments_prints_usage() {
    let temp = TempDir::new().unwrap();
    strokecanvas_cmd(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn actions_require_surface_size() {
    let temp = TempDir::new().unwrap();
    let strokes = write_file(&temp, "strokes.json", STROKES);
    strokecanvas_cmd(temp.path())
        .arg("--strokes")
        .arg(&strokes)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--width and --height are required"));
}

#[test]
fn replay_rescales_to_surface() {
    let temp = TempDir::new().unwrap();
    let strokes = write_file(&temp, "strokes.json", STROKES);
    strokecanvas_cmd(temp.path())
        .args(["--width", "300", "--height", "600", "--strokes"])
        .arg(&strokes)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "add_path 7 0xff0000ff 2.00 [20.00,40.00 300.00,600.00]",
        ));
}

#[test]
fn config_pixel_density_scales_output() {
    let temp = TempDir::new().unwrap();
    let strokes = write_file(&temp, "strokes.json", STROKES);
    let config = write_file(&temp, "custom.toml", "[surface]\npixel_density = 2.0\n");
    strokecanvas_cmd(temp.path())
        .args(["--width", "150", "--height", "300", "--config"])
        .arg(&config)
        .arg("--strokes")
        .arg(&strokes)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "add_path 7 0xff0000ff 4.00 [20.00,40.00 300.00,600.00]",
        ));
}

#[test]
fn gestures_draw_and_erase() {
    let temp = TempDir::new().unwrap();
    let gestures = write_file(&temp, "gestures.json", LINE_GESTURE);
    strokecanvas_cmd(temp.path())
        .args(["--width", "300", "--height", "600", "--gestures"])
        .arg(&gestures)
        .args(["--erase", "75,20", "--erase", "75,2"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("new_path 1 0xff000000 3.00")
                .and(predicate::str::contains("add_point 100.00,0.00"))
                .and(predicate::str::contains("end_path"))
                .and(predicate::str::contains("erase 75.00,20.00: no hit"))
                .and(predicate::str::contains("erased 1"))
                .and(predicate::str::contains("delete_path 1")),
        );
}

#[test]
fn eraser_gestures_remove_replayed_stroke() {
    let temp = TempDir::new().unwrap();
    let strokes = write_file(&temp, "strokes.json", STROKES);
    let gestures = write_file(
        &temp,
        "erase.json",
        r#"[{"phase": "start", "x": 20, "y": 40},
            {"phase": "update", "x": 21, "y": 41},
            {"phase": "end", "x": 21, "y": 41}]"#,
    );
    strokecanvas_cmd(temp.path())
        .args(["--width", "300", "--height", "600", "--eraser", "--strokes"])
        .arg(&strokes)
        .arg("--gestures")
        .arg(&gestures)
        .assert()
        .success()
        .stdout(predicate::str::contains("delete_path 7").and(predicate::str::contains("new_path").not()));
}

#[test]
fn undo_removes_owners_stroke() {
    let temp = TempDir::new().unwrap();
    let strokes = write_file(&temp, "strokes.json", STROKES);
    let gestures = write_file(&temp, "gestures.json", LINE_GESTURE);
    strokecanvas_cmd(temp.path())
        .args(["--width", "300", "--height", "600", "--owner", "remote", "--undo", "--strokes"])
        .arg(&strokes)
        .arg("--gestures")
        .arg(&gestures)
        .assert()
        .success()
        .stdout(predicate::str::contains("undone 1"));
}

#[test]
fn export_writes_wire_records() {
    let temp = TempDir::new().unwrap();
    let strokes = write_file(&temp, "strokes.json", STROKES);
    let out = temp.path().join("export.json");
    strokecanvas_cmd(temp.path())
        .args(["--width", "300", "--height", "600", "--strokes"])
        .arg(&strokes)
        .arg("--export")
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["surface"]["width"], 300.0);
    assert_eq!(json["strokes"][0]["path"]["id"], 7);
    assert_eq!(json["strokes"][0]["path"]["data"][1], "150.00,300.00");
    assert_eq!(json["strokes"][0]["drawer"], "remote");
}

#[test]
fn export_to_stdout_is_pure_json() {
    let temp = TempDir::new().unwrap();
    let strokes = write_file(&temp, "strokes.json", STROKES);
    let output = strokecanvas_cmd(temp.path())
        .args(["--width", "300", "--height", "600", "--erase", "0,0", "--export", "-", "--strokes"])
        .arg(&strokes)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["strokes"].as_array().map(Vec::len), Some(1));
}

#[test]
fn invalid_stroke_file_fails() {
    let temp = TempDir::new().unwrap();
    let strokes = write_file(&temp, "strokes.json", "{not json");
    strokecanvas_cmd(temp.path())
        .args(["--width", "300", "--height", "600", "--strokes"])
        .arg(&strokes)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid stroke file"));
}
