use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        static CTR: AtomicUsize = AtomicUsize::new(0);
        let n = CTR.fetch_add(1, Ordering::SeqCst);
        let mut path = std::env::temp_dir();
        path.push(format!("{}_{}_{}", prefix, std::process::id(), n));
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

fn dwdt() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dwdt"))
}

fn run_ok(cwd: &Path, args: &[&str]) -> Output {
    let out = dwdt().current_dir(cwd).args(args).output().expect("run dwdt");
    assert!(
        out.status.success(),
        "expected success\nargs={args:?}\nstatus={}\nstdout={}\nstderr={}",
        out.status,
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr),
    );
    out
}

fn run_err(cwd: &Path, args: &[&str]) -> Output {
    let out = dwdt().current_dir(cwd).args(args).output().expect("run dwdt");
    assert!(
        !out.status.success(),
        "expected failure\nargs={args:?}\nstatus={}\nstdout={}\nstderr={}",
        out.status,
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr),
    );
    out
}

fn run_ok_json(cwd: &Path, args: &[&str]) -> Value {
    let out = run_ok(cwd, args);
    serde_json::from_slice(&out.stdout).expect("stdout is valid JSON")
}

/// A blank image large enough for every built-in table.
fn write_blank_image(dir: &Path) -> PathBuf {
    let path = dir.join("game.nes");
    std::fs::write(&path, vec![0u8; 0x8000]).expect("write image");
    path
}

#[test]
fn help_smoke() {
    let dir = TempDir::new("dwdt_e2e_help");
    let out = run_ok(dir.path(), &["--help"]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Tools for moving packed game data"));
    assert!(stdout.contains("extract"));
    assert!(stdout.contains("insert"));
}

#[test]
fn tables_lists_builtin_types() {
    let dir = TempDir::new("dwdt_e2e_tables");
    let json = run_ok_json(dir.path(), &["--json", "tables"]);
    let types = json["types"].as_array().expect("types array");
    assert_eq!(types.len(), 3);
    assert_eq!(types[0]["name"], "monsters");
    assert_eq!(types[0]["image_offset"], 0x5e5b);
}

#[test]
fn full_pipeline_edits_a_single_byte() {
    let dir = TempDir::new("dwdt_e2e_pipeline");
    write_blank_image(dir.path());

    let json = run_ok_json(
        dir.path(),
        &[
            "--json", "extract", "game.nes", "--type", "monsters", "--out", "monsters.dwdt",
        ],
    );
    assert_eq!(json["type_id"], 1);
    assert_eq!(json["payload_size"], 640);

    let json = run_ok_json(
        dir.path(),
        &["--json", "unpack", "monsters.dwdt", "--out", "monsters.json"],
    );
    assert_eq!(json["records"], 40);

    // edit record 1's strength from 0 to 9 in the structured form
    let text = std::fs::read_to_string(dir.path().join("monsters.json")).unwrap();
    let mut set: Value = serde_json::from_str(&text).unwrap();
    let field = &mut set["records"][1]["fields"][0];
    assert_eq!(field["name"], "strength");
    field["value"] = Value::from(9);
    std::fs::write(
        dir.path().join("monsters.json"),
        serde_json::to_string_pretty(&set).unwrap(),
    )
    .unwrap();

    run_ok(dir.path(), &["validate", "monsters.json"]);
    run_ok(
        dir.path(),
        &["pack", "monsters.json", "--out", "edited.dwdt"],
    );
    run_ok(
        dir.path(),
        &["insert", "edited.dwdt", "--image", "game.nes"],
    );

    let image = std::fs::read(dir.path().join("game.nes")).unwrap();
    assert_eq!(image.len(), 0x8000);
    let strength_at = 0x5e5b + 16;
    for (i, b) in image.iter().enumerate() {
        let expected = if i == strength_at { 9 } else { 0 };
        assert_eq!(*b, expected, "byte 0x{i:x}");
    }

    // a timestamp-tagged backup of the pre-insert image exists
    let backups: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("game.nes.bak."))
        .collect();
    assert_eq!(backups.len(), 1);
    let backup = std::fs::read(dir.path().join(&backups[0])).unwrap();
    assert!(backup.iter().all(|&b| b == 0));
}

#[test]
fn out_of_range_edit_fails_validation_and_pack() {
    let dir = TempDir::new("dwdt_e2e_validate");
    write_blank_image(dir.path());
    run_ok(
        dir.path(),
        &["extract", "game.nes", "--type", "spells", "--out", "spells.dwdt"],
    );
    run_ok(
        dir.path(),
        &["unpack", "spells.dwdt", "--out", "spells.json"],
    );

    let text = std::fs::read_to_string(dir.path().join("spells.json")).unwrap();
    let mut set: Value = serde_json::from_str(&text).unwrap();
    // "effect" only allows 0..=4
    let field = &mut set["records"][0]["fields"][1];
    assert_eq!(field["name"], "effect");
    field["value"] = Value::from(9);
    std::fs::write(
        dir.path().join("spells.json"),
        serde_json::to_string(&set).unwrap(),
    )
    .unwrap();

    let json_out = dwdt()
        .current_dir(dir.path())
        .args(["--json", "validate", "spells.json"])
        .output()
        .expect("run dwdt");
    assert!(!json_out.status.success());
    let report: Value = serde_json::from_slice(&json_out.stdout).unwrap();
    assert_eq!(report["ok"], false);
    assert_eq!(report["violations"][0]["field"], "effect");

    let err = run_err(
        dir.path(),
        &["pack", "spells.json", "--out", "spells2.dwdt"],
    );
    let stderr = String::from_utf8_lossy(&err.stderr);
    assert!(stderr.contains("effect"), "stderr: {stderr}");
    assert!(!dir.path().join("spells2.dwdt").exists());
}

#[test]
fn corrupt_container_is_rejected_by_every_consumer() {
    let dir = TempDir::new("dwdt_e2e_corrupt");
    write_blank_image(dir.path());
    run_ok(
        dir.path(),
        &["extract", "game.nes", "--type", "items", "--out", "items.dwdt"],
    );

    let path = dir.path().join("items.dwdt");
    let mut bytes = std::fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    std::fs::write(&path, &bytes).unwrap();

    for args in [
        ["inspect", "items.dwdt", "", ""],
        ["unpack", "items.dwdt", "--out", "items.json"],
        ["insert", "items.dwdt", "--image", "game.nes"],
    ] {
        let args: Vec<&str> = args.iter().copied().filter(|a| !a.is_empty()).collect();
        let err = run_err(dir.path(), &args);
        let stderr = String::from_utf8_lossy(&err.stderr);
        assert!(stderr.contains("checksum mismatch"), "stderr: {stderr}");
    }
    // the image was never touched
    let image = std::fs::read(dir.path().join("game.nes")).unwrap();
    assert!(image.iter().all(|&b| b == 0));
}

#[test]
fn custom_registry_file_overrides_builtin_tables() {
    let dir = TempDir::new("dwdt_e2e_registry");
    std::fs::write(dir.path().join("game.nes"), vec![0u8; 0x200]).unwrap();
    std::fs::write(
        dir.path().join("tables.json"),
        r#"{
            "types": [
                {
                    "type_id": 7,
                    "name": "chests",
                    "image_offset": 16,
                    "payload_size": 8,
                    "record_count": 2,
                    "record_stride": 4,
                    "fields": [
                        { "name": "contents", "offset": 0, "width": "u8", "min": 0, "max": 31 }
                    ]
                }
            ]
        }"#,
    )
    .unwrap();

    let json = run_ok_json(
        dir.path(),
        &[
            "--json",
            "extract",
            "game.nes",
            "--type",
            "chests",
            "--registry",
            "tables.json",
            "--out",
            "chests.dwdt",
        ],
    );
    assert_eq!(json["type_id"], 7);
    assert_eq!(json["payload_size"], 8);

    // the builtin monster table does not exist under this registry
    let err = run_err(
        dir.path(),
        &[
            "extract",
            "game.nes",
            "--type",
            "monsters",
            "--registry",
            "tables.json",
            "--out",
            "nope.dwdt",
        ],
    );
    let stderr = String::from_utf8_lossy(&err.stderr);
    assert!(stderr.contains("unknown type"), "stderr: {stderr}");
}

#[test]
fn overlapping_registry_file_is_rejected_at_startup() {
    let dir = TempDir::new("dwdt_e2e_overlap");
    std::fs::write(
        dir.path().join("tables.json"),
        r#"{
            "types": [
                { "type_id": 1, "name": "a", "image_offset": 16, "payload_size": 8,
                  "record_count": 2, "record_stride": 4, "fields": [] },
                { "type_id": 2, "name": "b", "image_offset": 23, "payload_size": 8,
                  "record_count": 2, "record_stride": 4, "fields": [] }
            ]
        }"#,
    )
    .unwrap();

    let err = run_err(dir.path(), &["tables", "--registry", "tables.json"]);
    let stderr = String::from_utf8_lossy(&err.stderr);
    assert!(stderr.contains("overlap"), "stderr: {stderr}");
}
