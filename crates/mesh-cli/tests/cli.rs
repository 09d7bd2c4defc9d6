//! End-to-end tests for the mesh-gauge binary.

use std::path::Path;
use std::process::{Command, Output};

use mesh_gauge::{Mesh, Vertex};
use tempfile::TempDir;

fn cube(size: f64) -> Mesh {
    let mut mesh = Mesh::new();
    for i in 0..8u32 {
        let x = if matches!(i, 1 | 2 | 5 | 6) { size } else { 0.0 };
        let y = if matches!(i, 2 | 3 | 6 | 7) { size } else { 0.0 };
        let z = if i >= 4 { size } else { 0.0 };
        mesh.vertices.push(Vertex::from_coords(x, y, z));
    }
    mesh.faces = vec![
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];
    mesh
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mesh-gauge"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run mesh-gauge")
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
}

fn write_cube(dir: &Path, name: &str, size: f64) -> String {
    let path = dir.join(name);
    cube(size).save(&path).unwrap();
    path.display().to_string()
}

#[test]
fn test_analyze_json() {
    let dir = TempDir::new().unwrap();
    let path = write_cube(dir.path(), "cube.stl", 10.0);

    let out = run(&["--format", "json", "analyze", &path, "--material", "Aluminium"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let value = json(&out);
    let report = &value["report"];
    assert!((report["volume"].as_f64().unwrap() - 1000.0).abs() < 1e-6);
    assert_eq!(report["is_watertight"], true);
    assert_eq!(report["weight_estimate"]["display"], "2.70 g");
    assert_eq!(value["material"], "Aluminium");
}

#[test]
fn test_analyze_open_mesh_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("open.stl");
    let mut mesh = cube(10.0);
    mesh.faces.truncate(10);
    mesh.save(&path).unwrap();

    let out = run(&["analyze", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Watertight"));
}

#[test]
fn test_scale_writes_output() {
    let dir = TempDir::new().unwrap();
    let path = write_cube(dir.path(), "cube.stl", 10.0);
    let scaled = dir.path().join("scaled.stl");

    let out = run(&[
        "--format",
        "json",
        "scale",
        &path,
        "--density",
        "1.0",
        "--target-grams",
        "8.0",
        "-o",
        scaled.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let value = json(&out);
    assert!((value["scaled"]["factor"].as_f64().unwrap() - 2.0).abs() < 1e-9);

    let report = Mesh::load(&scaled).unwrap().analyze().unwrap();
    assert!((report.volume - 8000.0).abs() < 1e-3);
}

#[test]
fn test_measure_json() {
    let dir = TempDir::new().unwrap();
    let path = write_cube(dir.path(), "cube.stl", 10.0);

    let out = run(&[
        "--format", "json", "measure", &path, "--view", "top", "--from", "0,0,10", "--to",
        "10,0,10",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let value = json(&out);
    assert_eq!(value["view"], "top");
    assert_eq!(value["result"]["label"], "10.00 mm");
}

#[test]
fn test_measure_coincident_points_fail() {
    let dir = TempDir::new().unwrap();
    let path = write_cube(dir.path(), "cube.stl", 10.0);

    let out = run(&["measure", &path, "--from", "1,1,1", "--to", "1,1,1"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_materials_and_bad_input() {
    let out = run(&["--format", "json", "materials"]);
    assert!(out.status.success());
    let value = json(&out);
    assert!(
        value
            .as_array()
            .unwrap()
            .iter()
            .any(|m| m["slug"] == "sterling-silver-925")
    );

    let out = run(&["analyze", "missing.stl"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("MESH-"));
}

#[test]
fn test_annotate_writes_sidecar() {
    let dir = TempDir::new().unwrap();
    let path = write_cube(dir.path(), "cube.stl", 10.0);
    let sidecar = dir.path().join("cube.annotations.json");

    let out = run(&["annotate", &path, "--add", "5,0,5", "--text", "sprue mark"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(sidecar.exists());

    let out = run(&["--format", "json", "annotate", &path, "--mark-read", "1"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let value = json(&out);
    assert_eq!(value["unread"], 0);
    let note = &value["annotations"][0];
    assert_eq!(note["id"], 1);
    assert_eq!(note["text"], "sprue mark");
    assert_eq!(note["is_read"], true);
    assert_eq!(note["point"][0].as_f64(), Some(5.0));

    let out = run(&["annotate", &path, "--remove", "7"]);
    assert_eq!(out.status.code(), Some(1));

    let out = run(&["annotate", &path, "--remove", "1"]);
    assert!(out.status.success());
    assert!(!sidecar.exists());
}
