//! The fixed, ordered registry of source patches for one installation root.
//!
//! Descriptors are ephemeral: the set is reconstructed from the resolved root
//! on every invocation. The only durable state is the backup files on disk.

use std::path::{Path, PathBuf};

use crate::core::transforms;

/// Suffix appended to a target's file name to form its backup path.
pub const BACKUP_SUFFIX: &str = ".gsd-backup";

/// One patchable unit: a target file, its backup, and a pure text transform.
pub struct PatchDescriptor {
    /// Human identifier (target file basename or short path).
    pub name: &'static str,
    /// Absolute path to the file to be modified.
    pub target: PathBuf,
    /// Backup path: same directory, [`BACKUP_SUFFIX`] appended.
    pub backup: PathBuf,
    /// Idempotent text transform; already-patched input passes through
    /// unchanged.
    pub transform: fn(&str) -> String,
    /// Free text for reporting.
    pub description: &'static str,
}

/// Backup path for a target: same directory, suffix appended to the file name.
pub fn backup_path(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!("{file_name}{BACKUP_SUFFIX}"))
}

fn descriptor(
    root: &Path,
    name: &'static str,
    rel: &[&str],
    transform: fn(&str) -> String,
    description: &'static str,
) -> PatchDescriptor {
    let mut target = root.to_path_buf();
    for part in rel {
        target.push(part);
    }
    let backup = backup_path(&target);
    PatchDescriptor {
        name,
        target,
        backup,
        transform,
        description,
    }
}

/// The full patch set for an installation root, in application order.
pub fn patch_set(root: &Path) -> Vec<PatchDescriptor> {
    vec![
        descriptor(
            root,
            "prompt.py",
            &["ui", "shell", "prompt.py"],
            transforms::prompt_status_bar,
            "Status bar GSD integration",
        ),
        descriptor(
            root,
            "soul/__init__.py",
            &["soul", "__init__.py"],
            transforms::soul_status_snapshot,
            "StatusSnapshot GSD extensions",
        ),
        descriptor(
            root,
            "kimisoul.py",
            &["soul", "kimisoul.py"],
            transforms::kimisoul_status,
            "GSD context provider",
        ),
        descriptor(
            root,
            "shell/__init__.py",
            &["ui", "shell", "__init__.py"],
            transforms::shell_welcome,
            "GSD welcome message",
        ),
        descriptor(
            root,
            "wire/types.py",
            &["wire", "types.py"],
            transforms::wire_event_types,
            "GSD wire event types",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_path_appends_suffix_in_place() {
        let target = Path::new("/opt/kimi_cli/ui/shell/prompt.py");
        assert_eq!(
            backup_path(target),
            Path::new("/opt/kimi_cli/ui/shell/prompt.py.gsd-backup")
        );
    }

    #[test]
    fn patch_set_is_ordered_and_rooted() {
        let root = Path::new("/opt/kimi_cli");
        let descriptors = patch_set(root);

        assert_eq!(descriptors.len(), 5);
        assert_eq!(descriptors[0].name, "prompt.py");
        assert_eq!(descriptors[4].name, "wire/types.py");
        for descriptor in &descriptors {
            assert!(descriptor.target.starts_with(root));
            assert_eq!(descriptor.backup, backup_path(&descriptor.target));
        }
    }
}
