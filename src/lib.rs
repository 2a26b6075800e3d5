//! DermaCheck backend core: Gemini-backed skin analysis, a lexically
//! grounded dermatology knowledge base, skincare routine generation, and
//! report delivery. This crate is the orchestration layer only; HTTP
//! routing, auth, and persistence live in the host application.

pub mod config;
pub mod error;
pub mod llm;
pub mod prompts;
pub mod rag;
pub mod schemas;
pub mod services;
pub mod types;
pub mod utils;

pub use config::Config;
pub use error::DermaError;
pub use llm::{GeminiClient, ModelClient};
pub use rag::KnowledgeBase;
