//! GSD-enhanced wrapper around Kimi CLI.
//!
//! `jim` injects GSD ("Get Shit Done") planning-metadata awareness into Kimi
//! CLI by patching its installed Python sources, then launching the tool with
//! the GSD master agent preloaded. The architecture enforces a strict
//! separation:
//!
//! - **[`core`]**: Pure, deterministic logic (patch transforms, planning-doc
//!   extraction, patch-state classification). No I/O, fully testable in
//!   isolation.
//! - **[`io`]**: Side-effecting operations (installation discovery, the patch
//!   registry and engine, syntax validation, process execution).
//!
//! Orchestration modules ([`launch`], [`maintain`], [`banner`]) coordinate
//! core logic with I/O to implement the two CLI surfaces: the `jim` launcher
//! and the `jim-patcher` maintenance tool.

pub mod banner;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod launch;
pub mod logging;
pub mod maintain;
