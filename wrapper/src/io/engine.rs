//! Patch engine: apply, restore, and status for the patch registry.
//!
//! Durable-state contract: the presence of a descriptor's backup file is the
//! sole source of truth for "this target is patched". The backup is created
//! once, before the first write, so it always holds the pristine original
//! even across repeated applies. Batches are best-effort: one descriptor's
//! failure is reported and the rest still run.

use std::fs;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, warn};

use crate::io::registry::PatchDescriptor;
use crate::io::verify::SyntaxValidator;

/// Result of applying a single descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Target was transformed and written; a backup exists.
    Applied,
    /// Transform was a no-op (already patched or anchors absent); no disk
    /// changes were made.
    AlreadyCurrent,
}

/// Per-descriptor status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub name: &'static str,
    pub target_exists: bool,
    pub patched: bool,
}

/// Apply one descriptor.
///
/// At most one file read, one file copy, and one file write. The transformed
/// text is validated before anything is written; a rejected transform leaves
/// the target untouched and creates no backup.
pub fn apply(
    descriptor: &PatchDescriptor,
    validator: &dyn SyntaxValidator,
) -> Result<ApplyOutcome> {
    if !descriptor.target.exists() {
        bail!("target not found: {}", descriptor.target.display());
    }

    let original = fs::read_to_string(&descriptor.target)
        .with_context(|| format!("read {}", descriptor.target.display()))?;
    let patched = (descriptor.transform)(&original);

    if patched == original {
        debug!(name = descriptor.name, "no changes needed");
        return Ok(ApplyOutcome::AlreadyCurrent);
    }

    validator.validate(descriptor.name, &patched)?;

    // Backup only the pristine original; never overwrite an existing backup.
    if !descriptor.backup.exists() {
        fs::copy(&descriptor.target, &descriptor.backup)
            .with_context(|| format!("back up {}", descriptor.target.display()))?;
        debug!(backup = %descriptor.backup.display(), "backed up original");
    }

    fs::write(&descriptor.target, patched)
        .with_context(|| format!("write {}", descriptor.target.display()))?;
    info!(name = descriptor.name, "patched");
    Ok(ApplyOutcome::Applied)
}

/// Apply every descriptor independently; returns false if any failed.
///
/// Progress is reported descriptor-by-descriptor on stdout. A failure never
/// stops the remaining descriptors, and already-applied descriptors are not
/// rolled back.
pub fn apply_all(descriptors: &[PatchDescriptor], validator: &dyn SyntaxValidator) -> bool {
    let mut success = true;
    for descriptor in descriptors {
        println!("{}: {}", descriptor.name, descriptor.description);
        match apply(descriptor, validator) {
            Ok(ApplyOutcome::Applied) => println!("  patched"),
            Ok(ApplyOutcome::AlreadyCurrent) => println!("  no changes needed (already patched?)"),
            Err(err) => {
                warn!(name = descriptor.name, err = %err, "patch failed");
                println!("  failed: {err:#}");
                success = false;
            }
        }
    }
    success
}

/// Restore one descriptor from its backup.
///
/// Copies the backup over the target (overwriting any patched or user-modified
/// content) and deletes the backup. Returns `Ok(false)` when no backup exists;
/// that is "nothing to restore", not an error.
pub fn restore(descriptor: &PatchDescriptor) -> Result<bool> {
    if !descriptor.backup.exists() {
        return Ok(false);
    }
    fs::copy(&descriptor.backup, &descriptor.target)
        .with_context(|| format!("restore {}", descriptor.target.display()))?;
    fs::remove_file(&descriptor.backup)
        .with_context(|| format!("remove backup {}", descriptor.backup.display()))?;
    info!(name = descriptor.name, "restored");
    Ok(true)
}

/// Restore every descriptor independently; returns false if any restore
/// operation failed. Missing backups are a normal outcome.
pub fn restore_all(descriptors: &[PatchDescriptor]) -> bool {
    let mut success = true;
    for descriptor in descriptors {
        match restore(descriptor) {
            Ok(true) => println!("restored {}", descriptor.name),
            Ok(false) => println!("nothing to restore for {}", descriptor.name),
            Err(err) => {
                warn!(name = descriptor.name, err = %err, "restore failed");
                println!("failed to restore {}: {err:#}", descriptor.name);
                success = false;
            }
        }
    }
    success
}

/// Pure read of target/backup existence for every descriptor. No mutation.
pub fn status(descriptors: &[PatchDescriptor]) -> Vec<StatusEntry> {
    descriptors
        .iter()
        .map(|descriptor| StatusEntry {
            name: descriptor.name,
            target_exists: descriptor.target.exists(),
            patched: descriptor.backup.exists(),
        })
        .collect()
}
