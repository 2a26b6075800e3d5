pub mod knowledge;

pub use knowledge::{KnowledgeBase, KnowledgeChunk};
