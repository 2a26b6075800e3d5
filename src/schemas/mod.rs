//! Declarative response schemas sent to Gemini as `responseSchema`. Each
//! orchestration task owns exactly one top-level schema; the matching serde
//! types in `crate::types` are the parse-side half of the same contract.

pub mod advanced;
pub mod analysis;
pub mod rag;
pub mod skincare;

pub use advanced::ADVANCED_RESPONSE_SCHEMA;
pub use analysis::ANALYSIS_RESPONSE_SCHEMA;
pub use rag::RAG_RESPONSE_SCHEMA;
pub use skincare::{COACHING_RESULT_SCHEMA, PERSONALIZED_ROUTINE_SCHEMA, SKINCARE_DIRECTION_SCHEMA};
