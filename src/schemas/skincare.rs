use once_cell::sync::Lazy;
use serde_json::{json, Value};

pub static SKINCARE_DIRECTION_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "Một câu tóm tắt về định hướng chăm sóc da chính, ví dụ: \"Tập trung vào việc kiểm soát dầu, trị mụn và làm dịu da.\""
            },
            "priorityGoals": {
                "type": "ARRAY",
                "description": "Danh sách các mục tiêu ưu tiên hàng đầu, ví dụ: [\"Kiểm soát dầu và bã nhờn\", \"Giảm viêm và mụn\", \"Làm dịu da nhạy cảm\"].",
                "items": { "type": "STRING" }
            }
        },
        "required": ["summary", "priorityGoals"]
    })
});

static ROUTINE_STEP_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "step": { "type": "NUMBER", "description": "Số thứ tự của bước." },
            "name": {
                "type": "STRING",
                "description": "Tên của bước, ví dụ: 'Rửa mặt', 'Tẩy tế bào chết'."
            },
            "productType": {
                "type": "STRING",
                "description": "Loại sản phẩm gợi ý, ví dụ: 'Sữa rửa mặt dịu nhẹ'."
            },
            "instructions": {
                "type": "STRING",
                "description": "Hướng dẫn sử dụng ngắn gọn."
            },
            "frequency": {
                "type": "STRING",
                "description": "Tần suất thực hiện, ví dụ: 'Hàng ngày', '2-3 lần/tuần'."
            }
        },
        "required": ["step", "name", "productType", "instructions", "frequency"]
    })
});

pub static PERSONALIZED_ROUTINE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "morning": {
                "type": "ARRAY",
                "description": "Các bước chăm sóc buổi sáng.",
                "items": *ROUTINE_STEP_SCHEMA
            },
            "evening": {
                "type": "ARRAY",
                "description": "Các bước chăm sóc buổi tối.",
                "items": *ROUTINE_STEP_SCHEMA
            },
            "weekly": {
                "type": "ARRAY",
                "description": "Các bước chăm sóc hàng tuần.",
                "items": *ROUTINE_STEP_SCHEMA
            },
            "tips": {
                "type": "ARRAY",
                "description": "Các mẹo bổ sung về lối sống hoặc chăm sóc da.",
                "items": { "type": "STRING" }
            },
            "warnings": {
                "type": "ARRAY",
                "description": "Các cảnh báo quan trọng, ví dụ như không kết hợp các hoạt chất.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["morning", "evening", "weekly", "tips", "warnings"]
    })
});

pub static COACHING_RESULT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "escalation": {
                "type": "BOOLEAN",
                "description": "Set to true if any zone has 'High' risk. Otherwise false."
            },
            "coach_message": {
                "type": "STRING",
                "description": "A warm, playful greeting and compliment."
            },
            "explanation": {
                "type": "STRING",
                "description": "A positive summary of the skin condition."
            },
            "routine": {
                "type": "OBJECT",
                "properties": {
                    "created": {
                        "type": "BOOLEAN",
                        "description": "Set to true if escalation is false."
                    },
                    "morning": {
                        "type": "ARRAY",
                        "description": "A simple 3-5 step morning routine. Each step is a string.",
                        "items": { "type": "STRING" }
                    },
                    "night": {
                        "type": "ARRAY",
                        "description": "A simple 3-5 step night routine. Each step is a string.",
                        "items": { "type": "STRING" }
                    }
                },
                "required": ["created", "morning", "night"]
            },
            "micro_education": {
                "type": "STRING",
                "description": "One cute, short, educational skincare tip."
            },
            "follow_up": {
                "type": "STRING",
                "description": "A follow-up message to encourage the user."
            }
        },
        "required": [
            "escalation",
            "coach_message",
            "explanation",
            "routine",
            "micro_education",
            "follow_up"
        ]
    })
});
