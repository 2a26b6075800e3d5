use serde::{Deserialize, Serialize};

use crate::types::normalize_unit_interval;

/// Lesion categories the advanced pass may report. `Uncertain` is a real
/// outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcneLabel {
    Blackhead,
    Whitehead,
    Papule,
    Pustule,
    NoduleOrCyst,
    InflammatoryArea,
    Uncertain,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionFeatures {
    pub size_px: f64,
    pub color_center_hex: String,
    pub raised: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcneDetection {
    pub id: String,
    pub center: Point,
    pub radius: f64,
    pub label: AcneLabel,
    /// 0.0–1.0 after validation.
    pub confidence: f64,
    pub features: DetectionFeatures,
    pub advice: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdvancedThresholds {
    pub heatmap_thresh: f64,
    pub min_area_px: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancedMeta {
    pub method: String,
    pub thresholds: AdvancedThresholds,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancedAnalysisResult {
    pub image_id: String,
    pub detections: Vec<AcneDetection>,
    pub svg_overlay: String,
    pub summary_vi: String,
    pub meta: AdvancedMeta,
}

impl AdvancedAnalysisResult {
    pub fn validate(&mut self) -> Result<(), String> {
        for detection in &mut self.detections {
            detection.confidence = normalize_unit_interval(detection.confidence)
                .map_err(|err| format!("detection '{}' confidence: {}", detection.id, err))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_use_snake_case_wire_names() {
        let parsed: AcneLabel = serde_json::from_str("\"nodule_or_cyst\"").unwrap();
        assert_eq!(parsed, AcneLabel::NoduleOrCyst);
        assert_eq!(
            serde_json::to_string(&AcneLabel::InflammatoryArea).unwrap(),
            "\"inflammatory_area\""
        );
        assert!(serde_json::from_str::<AcneLabel>("\"comedone\"").is_err());
    }

    #[test]
    fn validate_rejects_confidence_above_hundred() {
        let mut result = AdvancedAnalysisResult {
            image_id: "img_1".to_string(),
            detections: vec![AcneDetection {
                id: "d1".to_string(),
                center: Point { x: 100.0, y: 120.0 },
                radius: 9.0,
                label: AcneLabel::Papule,
                confidence: 250.0,
                features: DetectionFeatures {
                    size_px: 18.0,
                    color_center_hex: "#c0392b".to_string(),
                    raised: true,
                },
                advice: String::new(),
            }],
            svg_overlay: String::new(),
            summary_vi: String::new(),
            meta: AdvancedMeta {
                method: "gemini_visual".to_string(),
                thresholds: AdvancedThresholds {
                    heatmap_thresh: 0.3,
                    min_area_px: 50.0,
                },
                notes: String::new(),
            },
        };
        assert!(result.validate().is_err());

        result.detections[0].confidence = 92.0;
        result.validate().unwrap();
        assert_eq!(result.detections[0].confidence, 0.92);
    }
}
