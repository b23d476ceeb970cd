//! Patch-set state classification.
//!
//! The only persistent state the wrapper manages is the presence or absence
//! of backup files next to the patched targets. This module reduces those
//! per-descriptor flags to an overall state.

use std::fmt;

/// Overall state of a patch set.
///
/// `Partial` is an accepted, reportable outcome of best-effort apply/restore
/// batches, not an error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchState {
    /// No descriptor has a backup.
    Unpatched,
    /// Every descriptor has a backup.
    Patched,
    /// Some but not all descriptors have backups.
    Partial,
}

impl fmt::Display for PatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchState::Unpatched => write!(f, "unpatched"),
            PatchState::Patched => write!(f, "patched"),
            PatchState::Partial => write!(f, "partially patched"),
        }
    }
}

/// Classify a patch set from per-descriptor "backup exists" flags.
///
/// An empty set counts as `Unpatched`.
pub fn classify(patched: &[bool]) -> PatchState {
    let count = patched.iter().filter(|&&p| p).count();
    if count == 0 {
        PatchState::Unpatched
    } else if count == patched.len() {
        PatchState::Patched
    } else {
        PatchState::Partial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_is_unpatched() {
        assert_eq!(classify(&[]), PatchState::Unpatched);
    }

    #[test]
    fn all_backups_is_patched() {
        assert_eq!(classify(&[true, true, true]), PatchState::Patched);
    }

    #[test]
    fn no_backups_is_unpatched() {
        assert_eq!(classify(&[false, false]), PatchState::Unpatched);
    }

    #[test]
    fn mixed_backups_is_partial() {
        assert_eq!(classify(&[true, false, true]), PatchState::Partial);
    }
}
