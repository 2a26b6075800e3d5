//! Deterministic prompt builders. No I/O here: every function is a pure
//! formatter over structured inputs.

pub mod analysis;
pub mod rag;
pub mod report;
pub mod skincare;
