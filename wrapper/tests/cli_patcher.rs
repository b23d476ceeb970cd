//! CLI tests for the `jim-patcher` binary.
//!
//! Spawns the patcher against a fabricated installation root and verifies the
//! non-mutating surfaces: `status` reporting and `restore` with no backups.

use std::fs;
use std::path::Path;
use std::process::Command;

const TARGETS: &[(&str, &str)] = &[
    ("ui/shell", "prompt.py"),
    ("soul", "__init__.py"),
    ("soul", "kimisoul.py"),
    ("ui/shell", "__init__.py"),
    ("wire", "types.py"),
];

fn fake_install(root: &Path) {
    for (dir, file) in TARGETS {
        let dir = root.join(dir);
        fs::create_dir_all(&dir).expect("create target dir");
        fs::write(dir.join(file), "# stock kimi source\n").expect("write target");
    }
}

#[test]
fn status_reports_unpatched_fresh_install() {
    let temp = tempfile::tempdir().expect("tempdir");
    fake_install(temp.path());

    let output = Command::new(env!("CARGO_BIN_EXE_jim-patcher"))
        .arg("status")
        .arg("--root")
        .arg(temp.path())
        .output()
        .expect("run jim-patcher status");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("overall: unpatched"));
    assert!(stdout.contains("prompt.py"));
    assert!(!stdout.contains("patched: yes"));
}

#[test]
fn restore_without_backups_is_a_clean_no_op() {
    let temp = tempfile::tempdir().expect("tempdir");
    fake_install(temp.path());

    let output = Command::new(env!("CARGO_BIN_EXE_jim-patcher"))
        .arg("restore")
        .arg("--root")
        .arg(temp.path())
        .output()
        .expect("run jim-patcher restore");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("nothing to restore"));
    for (dir, file) in TARGETS {
        let contents =
            fs::read_to_string(temp.path().join(dir).join(file)).expect("read target");
        assert_eq!(contents, "# stock kimi source\n");
    }
}

#[test]
fn nonexistent_root_is_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("absent");

    let output = Command::new(env!("CARGO_BIN_EXE_jim-patcher"))
        .arg("status")
        .arg("--root")
        .arg(&missing)
        .output()
        .expect("run jim-patcher status");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("is not a directory"));
}
