//! Maintenance command drivers shared by `jim-patcher` and the `jim` flags.

use std::path::Path;

use crate::core::state::classify;
use crate::exit_codes;
use crate::io::config::WrapperConfig;
use crate::io::engine;
use crate::io::registry::patch_set;
use crate::io::verify::PythonValidator;

/// Apply all patches under `root`. Exit code 1 if any descriptor failed.
pub fn run_apply(root: &Path, config: &WrapperConfig) -> i32 {
    println!("Applying GSD patches to {}", root.display());
    println!();

    let descriptors = patch_set(root);
    let validator = PythonValidator::from_config(config);
    let ok = engine::apply_all(&descriptors, &validator);

    println!();
    if ok {
        println!("all patches applied");
        exit_codes::OK
    } else {
        println!("some patches failed; run `jim-patcher restore` to roll back");
        exit_codes::FAILURE
    }
}

/// Restore all targets under `root` from their backups.
///
/// Missing backups are a normal outcome; only failed restore operations flip
/// the exit code.
pub fn run_restore(root: &Path) -> i32 {
    println!("Restoring Kimi CLI sources in {}", root.display());
    println!();

    let descriptors = patch_set(root);
    let ok = engine::restore_all(&descriptors);

    println!();
    if ok {
        println!("restore complete");
        exit_codes::OK
    } else {
        println!("some restores failed");
        exit_codes::FAILURE
    }
}

/// Print per-descriptor status and the overall patch state. Always exits 0.
pub fn run_status(root: &Path) -> i32 {
    println!("Patch status for {}", root.display());
    println!();

    let descriptors = patch_set(root);
    let entries = engine::status(&descriptors);
    for entry in &entries {
        let target = if entry.target_exists { "ok" } else { "missing" };
        let patched = if entry.patched { "yes" } else { "no" };
        println!(
            "{:<20} target: {:<8} patched: {}",
            entry.name, target, patched
        );
    }

    let flags: Vec<bool> = entries.iter().map(|entry| entry.patched).collect();
    println!();
    println!("overall: {}", classify(&flags));
    exit_codes::OK
}
