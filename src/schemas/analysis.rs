use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Schema for one analyzed facial zone, including the visual-evidence
/// reasoning block.
pub static ZONE_ANALYSIS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "zone": {
                "type": "STRING",
                "description": "Tên vùng da được phân tích (ví dụ: Trán, Má trái, Má phải, Mũi, Cằm)."
            },
            "condition": {
                "type": "STRING",
                "description": "Tên tình trạng chính của vùng da này (ví dụ: Mụn viêm, Mụn đầu đen, Tăng sắc tố)."
            },
            "riskLevel": {
                "type": "STRING",
                "enum": ["Low", "Medium", "High"],
                "description": "Đánh giá mức độ rủi ro của vùng này: 'Low', 'Medium', 'High'."
            },
            "explanation": {
                "type": "STRING",
                "description": "Giải thích ngắn gọn về tình trạng của vùng da này."
            },
            "visualEvidence": {
                "type": "OBJECT",
                "description": "Chi tiết bằng chứng hình ảnh mà AI quan sát được.",
                "properties": {
                    "visualClues": {
                        "type": "STRING",
                        "description": "Mô tả bằng chứng hình ảnh cụ thể (ví dụ: \"quan sát thấy các nốt mụn đỏ, sưng viêm, có nhân trắng\")."
                    },
                    "reasoning": {
                        "type": "STRING",
                        "description": "Lý do tại sao AI đưa ra kết luận này dựa trên bằng chứng hình ảnh."
                    },
                    "certainty": {
                        "type": "NUMBER",
                        "description": "Độ chắc chắn về phân tích vùng này, là phân số từ 0.0 đến 1.0."
                    }
                },
                "required": ["visualClues", "reasoning", "certainty"]
            }
        },
        "required": ["zone", "condition", "riskLevel", "explanation", "visualEvidence"]
    })
});

pub static ANALYSIS_RESPONSE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "skinType": {
                "type": "STRING",
                "nullable": true,
                "enum": ["dầu (oily)", "khô (dry)", "nhạy cảm (sensitive)", "hỗn hợp (combination)"],
                "description": "Xác định loại da tổng thể của người dùng. Nếu không thể xác định, trả về null."
            },
            "overallSummary": {
                "type": "STRING",
                "description": "Tóm tắt tổng quan về tình trạng da trên toàn bộ khuôn mặt, kết hợp các phân tích từ từng vùng."
            },
            "zones": {
                "type": "ARRAY",
                "description": "Một danh sách các phân tích chi tiết cho từng vùng da riêng biệt có thể thấy trên khuôn mặt.",
                "items": *ZONE_ANALYSIS_SCHEMA
            },
            "recommendations": {
                "type": "ARRAY",
                "description": "Danh sách các bước chăm sóc ban đầu an toàn, chung cho toàn bộ khuôn mặt. Nếu có vùng nào rủi ro cao hoặc không chắc chắn, khuyến nghị chính phải là 'Gặp bác sĩ da liễu ngay lập tức'.",
                "items": { "type": "STRING" }
            },
            "safetyNote": {
                "type": "STRING",
                "description": "Lời nhắc an toàn: khuyên người dùng gặp bác sĩ da liễu nếu tình trạng kéo dài hoặc nghiêm trọng."
            },
            "isUncertain": {
                "type": "BOOLEAN",
                "description": "Đặt thành true nếu AI không chắc chắn về kết quả (ví dụ: ảnh mờ, triệu chứng mâu thuẫn, tình trạng phức tạp). Ngược lại là false."
            },
            "uncertaintyReason": {
                "type": "STRING",
                "description": "Nếu isUncertain là true, cung cấp một thông báo cảnh báo rõ ràng, khuyên người dùng nên gặp bác sĩ. Nếu false, để trống chuỗi này."
            },
            "confidenceScore": {
                "type": "NUMBER",
                "description": "Đánh giá độ tin cậy tổng thể của AI cho toàn bộ phân tích, từ 0 đến 100. 100 là cực kỳ chắc chắn."
            }
        },
        "required": [
            "skinType",
            "overallSummary",
            "zones",
            "recommendations",
            "safetyNote",
            "isUncertain",
            "uncertaintyReason",
            "confidenceScore"
        ]
    })
});
