use once_cell::sync::Lazy;
use serde_json::{json, Value};

static DETECTION_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "STRING" },
            "center": {
                "type": "OBJECT",
                "properties": {
                    "x": { "type": "NUMBER" },
                    "y": { "type": "NUMBER" }
                },
                "required": ["x", "y"]
            },
            "radius": { "type": "NUMBER" },
            "label": {
                "type": "STRING",
                "enum": [
                    "blackhead",
                    "whitehead",
                    "papule",
                    "pustule",
                    "nodule_or_cyst",
                    "inflammatory_area",
                    "uncertain"
                ]
            },
            "confidence": {
                "type": "NUMBER",
                "description": "Độ tin cậy của phát hiện này, là phân số từ 0.0 đến 1.0."
            },
            "features": {
                "type": "OBJECT",
                "properties": {
                    "size_px": { "type": "NUMBER" },
                    "color_center_hex": { "type": "STRING" },
                    "raised": { "type": "BOOLEAN" }
                },
                "required": ["size_px", "color_center_hex", "raised"]
            },
            "advice": { "type": "STRING" }
        },
        "required": ["id", "center", "radius", "label", "confidence", "features", "advice"]
    })
});

pub static ADVANCED_RESPONSE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "image_id": { "type": "STRING" },
            "detections": {
                "type": "ARRAY",
                "items": *DETECTION_SCHEMA
            },
            "svg_overlay": { "type": "STRING" },
            "summary_vi": { "type": "STRING" },
            "meta": {
                "type": "OBJECT",
                "properties": {
                    "method": { "type": "STRING" },
                    "thresholds": {
                        "type": "OBJECT",
                        "properties": {
                            "heatmap_thresh": { "type": "NUMBER" },
                            "min_area_px": { "type": "NUMBER" }
                        },
                        "required": ["heatmap_thresh", "min_area_px"]
                    },
                    "notes": { "type": "STRING" }
                },
                "required": ["method", "thresholds", "notes"]
            }
        },
        "required": ["image_id", "detections", "svg_overlay", "summary_vi", "meta"]
    })
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesion_label_enum_has_seven_values() {
        let labels = DETECTION_SCHEMA["properties"]["label"]["enum"]
            .as_array()
            .unwrap();
        assert_eq!(labels.len(), 7);
        assert!(labels.iter().any(|value| value == "uncertain"));
    }
}
