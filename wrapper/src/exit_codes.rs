//! Stable exit codes for the wrapper CLI surfaces.

/// Command succeeded (or all patch/restore operations succeeded).
pub const OK: i32 = 0;
/// Installation could not be located, or at least one operation failed.
pub const FAILURE: i32 = 1;
