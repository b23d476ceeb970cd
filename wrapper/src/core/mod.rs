//! Pure logic: patch transforms, planning-document extraction, and
//! patch-state classification. No I/O.

pub mod planning;
pub mod state;
pub mod transforms;
