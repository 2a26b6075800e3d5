pub mod gemini;

pub use gemini::{GeminiClient, GenerateRequest, ModelClient, Part};
