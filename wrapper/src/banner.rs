//! Welcome banner built from the project's `.planning/` documents.
//!
//! Banner content is cosmetic: every extraction is best-effort and any
//! failure (missing file, unreadable content, absent pattern) silently drops
//! that contribution. Only a missing `.planning/` directory suppresses the
//! banner entirely.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::planning;

/// Planning directory expected under the project root.
pub const PLANNING_DIR: &str = ".planning";

/// Optional todo-list file at the project root.
pub const TODOS_FILE: &str = ".kimi-todos.json";

/// Build the welcome banner for `project_root`, or `None` when the project
/// has no `.planning/` directory or no extractable contributions.
pub fn build_banner(project_root: &Path) -> Option<String> {
    let planning_dir = project_root.join(PLANNING_DIR);
    if !planning_dir.is_dir() {
        debug!(dir = %planning_dir.display(), "no planning directory, skipping banner");
        return None;
    }

    let mut parts = Vec::new();

    if let Some(title) = read_opt(&planning_dir.join("PROJECT.md"))
        .as_deref()
        .and_then(planning::project_title)
    {
        parts.push(format!("Project: {title}"));
    }

    if let Some(phase) = read_opt(&planning_dir.join("STATE.md"))
        .as_deref()
        .and_then(planning::current_phase)
    {
        parts.push(format!("Phase {phase}"));
    }

    if let Some(milestone) = read_opt(&planning_dir.join("ROADMAP.md"))
        .as_deref()
        .and_then(planning::current_milestone)
    {
        parts.push(format!("Milestone: {milestone}"));
    }

    if let Some((done, total)) = read_opt(&project_root.join(TODOS_FILE))
        .as_deref()
        .and_then(planning::todo_counts)
        && total > 0
    {
        parts.push(format!("todos {done}/{total}"));
    }

    planning::compose_banner(&parts)
}

fn read_opt(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_planning(root: &Path, name: &str, contents: &str) {
        let dir = root.join(PLANNING_DIR);
        fs::create_dir_all(&dir).expect("create planning dir");
        fs::write(dir.join(name), contents).expect("write planning doc");
    }

    #[test]
    fn no_planning_directory_means_no_banner() {
        let temp = tempfile::tempdir().expect("tempdir");
        assert_eq!(build_banner(temp.path()), None);
    }

    #[test]
    fn empty_planning_directory_means_no_banner() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(temp.path().join(PLANNING_DIR)).expect("create planning dir");
        assert_eq!(build_banner(temp.path()), None);
    }

    /// Title and phase joined by the fixed delimiter, in that order.
    #[test]
    fn banner_combines_title_and_phase() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_planning(temp.path(), "PROJECT.md", "# Demo App\n\nSome project.\n");
        write_planning(temp.path(), "STATE.md", "Current Phase: 3\n");

        let banner = build_banner(temp.path()).expect("banner");
        assert_eq!(banner, "Project: Demo App | Phase 3");
    }

    /// A missing title never suppresses the phase contribution.
    #[test]
    fn headingless_project_doc_still_yields_phase() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_planning(temp.path(), "PROJECT.md", "No heading here.\n");
        write_planning(temp.path(), "STATE.md", "current phase 7\n");

        let banner = build_banner(temp.path()).expect("banner");
        assert_eq!(banner, "Phase 7");
    }

    #[test]
    fn milestone_and_todos_contribute_when_present() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_planning(temp.path(), "ROADMAP.md", "## Current Milestone: MVP\n");
        fs::write(
            temp.path().join(TODOS_FILE),
            r#"[{"done": true}, {"done": false}]"#,
        )
        .expect("write todos");

        let banner = build_banner(temp.path()).expect("banner");
        assert_eq!(banner, "Milestone: MVP | todos 1/2");
    }

    #[test]
    fn unreadable_todos_are_silently_dropped() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_planning(temp.path(), "STATE.md", "Current Phase: 2\n");
        fs::write(temp.path().join(TODOS_FILE), "not json").expect("write todos");

        let banner = build_banner(temp.path()).expect("banner");
        assert_eq!(banner, "Phase 2");
    }
}
