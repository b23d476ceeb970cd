//! Source transforms applied to Kimi CLI's installed Python files.
//!
//! Each transform is a pure `fn(&str) -> String` over file text. Transforms
//! are marker-guarded: applying one to already-patched text returns the input
//! unchanged, which is what lets the engine's no-op check make repeated
//! `apply` runs safe. Anchors must match the upstream Kimi CLI sources
//! byte-for-byte; when an anchor is missing (upstream changed), the transform
//! leaves the file untouched and the engine reports it as already current.

/// Anchor: the bottom-toolbar renderer in `ui/shell/prompt.py`.
const TOOLBAR_DEF_ANCHOR: &str = "    def _render_bottom_toolbar(self) -> FormattedText:";

/// Helper injected above the toolbar renderer.
const GSD_CONTEXT_HELPER: &str = r#"
    def _get_gsd_context(self) -> dict:
        """Load GSD context from .planning directory."""
        try:
            from pathlib import Path
            import re
            import json
            import os

            planning_dir = Path.cwd() / '.planning'
            if not planning_dir.exists():
                return {}

            context = {
                'enabled': True,
                'phase': None,
                'todos_total': 0,
                'todos_done': 0,
                'milestone': None,
                'project': None,
            }

            state_file = planning_dir / 'STATE.md'
            if state_file.exists():
                content = state_file.read_text()
                phase_match = re.search(r'Current Phase[:\s]+(\d+)', content, re.IGNORECASE)
                if phase_match:
                    context['phase'] = phase_match.group(1)

            project_file = planning_dir / 'PROJECT.md'
            if project_file.exists():
                content = project_file.read_text()
                title_match = re.search(r'^#\s+(.+)$', content, re.MULTILINE)
                if title_match:
                    context['project'] = title_match.group(1)[:25]

            session_id = os.environ.get('KIMI_SESSION_ID', '')
            if session_id:
                todos_file = Path.home() / '.kimi' / 'todos' / f'{session_id}.json'
                if todos_file.exists():
                    todos = json.loads(todos_file.read_text())
                    context['todos_total'] = len(todos)
                    context['todos_done'] = sum(1 for t in todos if t.get('done'))

            return context
        except Exception:
            return {}

"#;

/// Anchor: the mode/status section of the toolbar renderer.
const TOOLBAR_MODE_BLOCK: &str = r#"        mode = str(self._mode).lower()
        if self._mode == PromptMode.AGENT:
            mode_details: list[str] = []
            if self._model_name:
                mode_details.append(self._model_name)
            if self._thinking:
                mode_details.append("thinking")
            if mode_details:
                mode += f" ({', '.join(mode_details)})"
        status = self._status_provider()"#;

/// GSD segment appended after the mode/status section.
const TOOLBAR_GSD_SEGMENT: &str = r#"
        gsd_ctx = self._get_gsd_context()
        if gsd_ctx.get('enabled'):
            gsd_parts = []
            if gsd_ctx.get('phase'):
                gsd_parts.append(f"📋P{gsd_ctx['phase']}")
            if gsd_ctx.get('todos_total'):
                done = gsd_ctx.get('todos_done', 0)
                total = gsd_ctx['todos_total']
                gsd_parts.append(f"✅{done}/{total}")
            if gsd_parts:
                gsd_str = " | " + " ".join(gsd_parts)
                fragments.extend([("fg:#00ff00", gsd_str), ("", " ")])
                columns -= len(gsd_str) + 1"#;

/// Add GSD status-bar integration to `ui/shell/prompt.py`.
pub fn prompt_status_bar(content: &str) -> String {
    let mut patched = content.to_string();

    if patched.contains(TOOLBAR_DEF_ANCHOR) && !patched.contains("_get_gsd_context") {
        let injected = format!("{GSD_CONTEXT_HELPER}{TOOLBAR_DEF_ANCHOR}");
        patched = patched.replace(TOOLBAR_DEF_ANCHOR, &injected);
    }

    if !patched.contains("gsd_ctx = self._get_gsd_context()") {
        let extended = format!("{TOOLBAR_MODE_BLOCK}\n{TOOLBAR_GSD_SEGMENT}");
        patched = patched.replace(TOOLBAR_MODE_BLOCK, &extended);
    }

    patched
}

/// Anchor: the `StatusSnapshot` dataclass in `soul/__init__.py`.
const SNAPSHOT_BLOCK: &str = r#"@dataclass(frozen=True, slots=True)
class StatusSnapshot:
    """Status snapshot for the soul."""

    context_usage: float
    """The usage of the context, in percentage."""

    yolo_enabled: bool
    """Whether YOLO mode is enabled.""""#;

/// GSD fields appended to `StatusSnapshot`.
const SNAPSHOT_GSD_FIELDS: &str = r#"

    gsd_enabled: bool = False
    """Whether GSD is active in current project."""

    gsd_phase: str | None = None
    """Current GSD phase number."""

    gsd_todos_total: int = 0
    """Total number of GSD todos."""

    gsd_todos_done: int = 0
    """Number of completed GSD todos."""

    gsd_milestone: str | None = None
    """Current GSD milestone name."""

    gsd_project: str | None = None
    """Current GSD project name.""""#;

/// Extend `StatusSnapshot` in `soul/__init__.py` with GSD fields.
pub fn soul_status_snapshot(content: &str) -> String {
    if content.contains("gsd_enabled") {
        return content.to_string();
    }
    let extended = format!("{SNAPSHOT_BLOCK}{SNAPSHOT_GSD_FIELDS}");
    content.replace(SNAPSHOT_BLOCK, &extended)
}

/// Anchor: the `status` property in `soul/kimisoul.py`.
const STATUS_PROPERTY_BLOCK: &str = r#"    @property
    def status(self) -> StatusSnapshot:
        return StatusSnapshot(
            context_usage=self._context_usage,
            yolo_enabled=self._approval.is_yolo(),
        )"#;

/// Replacement: GSD context provider plus an enriched `status` property.
const STATUS_PROPERTY_GSD: &str = r#"    def _load_gsd_context(self) -> dict:
        """Load GSD context from .planning directory."""
        try:
            from pathlib import Path
            import re
            import json

            work_dir = Path(str(self.runtime.builtin_args.KIMI_WORK_DIR))
            planning_dir = work_dir / '.planning'
            if not planning_dir.exists():
                return {}

            context = {
                'gsd_enabled': True,
                'gsd_phase': None,
                'gsd_todos_total': 0,
                'gsd_todos_done': 0,
                'gsd_milestone': None,
                'gsd_project': None,
            }

            state_file = planning_dir / 'STATE.md'
            if state_file.exists():
                content = state_file.read_text()
                phase_match = re.search(r'Current Phase[:\s]+(\d+)', content, re.IGNORECASE)
                if phase_match:
                    context['gsd_phase'] = phase_match.group(1)

            project_file = planning_dir / 'PROJECT.md'
            if project_file.exists():
                proj_content = project_file.read_text()
                title_match = re.search(r'^#\s+(.+)$', proj_content, re.MULTILINE)
                if title_match:
                    context['gsd_project'] = title_match.group(1)[:30]

            roadmap_file = planning_dir / 'ROADMAP.md'
            if roadmap_file.exists():
                road_content = roadmap_file.read_text()
                mile_match = re.search(r'##\s+Current Milestone[:\s]*([^\n]+)', road_content, re.IGNORECASE)
                if mile_match:
                    context['gsd_milestone'] = mile_match.group(1).strip()[:20]

            try:
                todo_file = work_dir / '.kimi-todos.json'
                if todo_file.exists():
                    todos = json.loads(todo_file.read_text())
                    context['gsd_todos_total'] = len(todos)
                    context['gsd_todos_done'] = sum(1 for t in todos if t.get('done'))
            except Exception:
                pass

            return context
        except Exception:
            return {}

    @property
    def status(self) -> StatusSnapshot:
        base = StatusSnapshot(
            context_usage=self._context_usage,
            yolo_enabled=self._approval.is_yolo(),
        )

        gsd_ctx = self._load_gsd_context()
        if gsd_ctx.get('gsd_enabled'):
            return StatusSnapshot(
                context_usage=base.context_usage,
                yolo_enabled=base.yolo_enabled,
                **gsd_ctx
            )
        return base"#;

/// Add a GSD context provider to the `status` property in `soul/kimisoul.py`.
pub fn kimisoul_status(content: &str) -> String {
    if content.contains("_load_gsd_context") {
        return content.to_string();
    }
    content.replace(STATUS_PROPERTY_BLOCK, STATUS_PROPERTY_GSD)
}

/// Anchor: the welcome printer in `ui/shell/__init__.py`.
const WELCOME_DEF_BLOCK: &str = r#"def _print_welcome_info(name: str, items: list[WelcomeInfoItem] | None):
    console.print()
    console.print(f"[bold]{name}[/bold]", justify="center")"#;

/// Replacement: GSD welcome helper plus the extended welcome printer.
const WELCOME_DEF_GSD: &str = r#"def _get_gsd_welcome() -> str | None:
    """Generate GSD welcome message."""
    try:
        from pathlib import Path
        import re

        planning_dir = Path.cwd() / '.planning'
        if not planning_dir.exists():
            return None

        lines = ["[bold green]📋 GSD Project[/bold green]"]

        project_file = planning_dir / 'PROJECT.md'
        if project_file.exists():
            content = project_file.read_text()
            title_match = re.search(r'^#\s+(.+)$', content, re.MULTILINE)
            if title_match:
                lines.append(f"   [cyan]{title_match.group(1)}[/cyan]")

        state_file = planning_dir / 'STATE.md'
        if state_file.exists():
            content = state_file.read_text()
            phase_match = re.search(r'Current Phase[:\s]+(\d+)', content, re.IGNORECASE)
            if phase_match:
                lines.append(f"   Phase: [yellow]{phase_match.group(1)}[/yellow]")

        return "\n".join(lines)
    except Exception:
        return None


def _print_welcome_info(name: str, items: list[WelcomeInfoItem] | None):
    console.print()
    console.print(f"[bold]{name}[/bold]", justify="center")

    gsd_welcome = _get_gsd_welcome()
    if gsd_welcome:
        console.print()
        console.print(gsd_welcome)"#;

/// Add the GSD welcome block to `ui/shell/__init__.py`.
pub fn shell_welcome(content: &str) -> String {
    if content.contains("_get_gsd_welcome") {
        return content.to_string();
    }
    content.replace(WELCOME_DEF_BLOCK, WELCOME_DEF_GSD)
}

/// Event model appended to `wire/types.py`.
const GSD_STATUS_EVENT: &str = r#"


# GSD extension events
class GSDStatusEvent(BaseModel):
    """GSD status update event."""

    type: Literal["gsd_status"] = "gsd_status"
    phase: str | None = None
    todos_total: int = 0
    todos_done: int = 0
    milestone: str | None = None
    project: str | None = None
"#;

/// Append the `GSDStatusEvent` wire model to `wire/types.py`.
pub fn wire_event_types(content: &str) -> String {
    if content.contains("GSDStatusEvent") {
        return content.to_string();
    }
    format!("{}{}", content.trim_end(), GSD_STATUS_EVENT)
}
