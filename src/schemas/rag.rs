use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Shared by the grounded-answer and chatbot calls; both return an answer
/// plus the sources actually used.
pub static RAG_RESPONSE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "answer": {
                "type": "STRING",
                "description": "Câu trả lời tổng hợp bằng tiếng Việt, định dạng Markdown."
            },
            "sources": {
                "type": "ARRAY",
                "description": "Danh sách các nguồn đã được sử dụng để tạo ra câu trả lời.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "sourceName": {
                            "type": "STRING",
                            "description": "Tên của nguồn, ví dụ 'Mayo Clinic'."
                        },
                        "url": {
                            "type": "STRING",
                            "description": "URL đầy đủ của nguồn."
                        }
                    },
                    "required": ["sourceName", "url"]
                }
            }
        },
        "required": ["answer", "sources"]
    })
});
