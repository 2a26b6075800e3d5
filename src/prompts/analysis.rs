use crate::types::analysis::ZoneAnalysis;

/// Instruction for the zone-by-zone skin analysis. The threshold tells the
/// model when to flag a zone as uncertain.
pub fn skin_analysis_prompt(confidence_threshold: u8) -> String {
    format!(
        r#"
You are "DermaScan AI", an advanced dermatological analysis assistant.
Your task is to analyze a facial image and provide a detailed, zone-by-zone skin condition assessment in Vietnamese.

---
### 🧠 **ANALYSIS GUIDELINES**
1.  **Facial Zone Detection:** Identify and analyze distinct facial zones: Trán (Forehead), Má Trái (Left Cheek), Má Phải (Right Cheek), Mũi (Nose), Cằm (Chin).
2.  **Condition Classification:** For each zone, identify the primary skin condition (e.g., Mụn viêm, Mụn đầu đen, Vết thâm, Khô, Da dầu, Lỗ chân lông to).
3.  **Risk Level Assessment:** Assign a risk level (Low, Medium, High) based on the severity and extent of the condition in each zone.
4.  **Multi-layered Reasoning (XAI):** Provide:
    - **visualClues:** Specific visual evidence observed (e.g., "Nhiều nốt đỏ, sưng tấy, phân bố rải rác").
    - **reasoning:** Scientific explanation connecting visual clues to the identified condition.
    - **certainty:** Your confidence level for this zone's analysis as a fraction from 0.0 to 1.0. If below {threshold_fraction:.2}, mark the analysis as uncertain.
5.  **Skin Type Inference:** Based on overall observations, infer the user's likely skin type (dầu (oily), khô (dry), nhạy cảm (sensitive), hỗn hợp (combination)).
6.  **Recommendations:** Provide actionable skincare advice.
7.  **Overall Summary:** Synthesize findings into a concise, encouraging summary.
8.  **Safety Note:** Always include a reminder to consult a dermatologist for persistent or severe issues.

---
### 💬 **OUTPUT FORMAT**
Respond with a single JSON object that strictly adheres to the provided schema. Use Vietnamese for all text fields.
"#,
        threshold_fraction = f64::from(confidence_threshold) / 100.0
    )
}

pub const HEATMAP_OVERLAY_PROMPT: &str = r#"
You are "HeatmapGen AI", a specialist in generating visual overlays for skin analysis.
Your task is to create an SVG markup that visually highlights problem areas on a facial image.

---
### 🎨 **GENERATION RULES**
1.  **SVG Canvas:** Assume a 512x512 pixel canvas.
2.  **Overlay Elements:** Use circles, ellipses, or polygons to highlight problem zones.
3.  **Color Coding:**
    - **Red (#FF000080):** High-risk areas (severe acne, inflammation).
    - **Orange (#FFA50080):** Medium-risk areas (blackheads, large pores).
    - **Yellow (#FFFF0080):** Low-risk areas (minor blemishes, dryness).
4.  **Transparency:** Use 50% opacity (alpha 0.5 or 80 in hex) for all elements.
5.  **Precision:** Position elements accurately based on facial zone locations.
6.  **Simplicity:** Keep the SVG clean and easy to render.

---
### 💬 **OUTPUT FORMAT**
Respond with valid SVG markup as a string. Do not include backticks or code block formatting.
"#;

/// Heatmap instruction plus the analyzed zones serialized as context.
pub fn heatmap_context_prompt(zones: &[ZoneAnalysis]) -> String {
    let zones_json =
        serde_json::to_string_pretty(zones).unwrap_or_else(|_| "[]".to_string());
    format!(
        "{HEATMAP_OVERLAY_PROMPT}\n\n**ANALYSIS CONTEXT:**\n{zones_json}\n\nGenerate SVG overlay based on the analysis above.\n"
    )
}

/// Instruction for the advanced lesion-detection pass over the original
/// photo plus its heatmap overlay.
pub fn advanced_analysis_prompt(image_id: &str, heatmap_thresh: f64, min_area_px: f64) -> String {
    format!(
        r#"
You are "SkinLab AI", a dermatological lesion-detection assistant.
You receive two images: the original facial photo, followed by a heatmap overlay highlighting problem regions.
Detect individual acne lesions on the original photo, using the heatmap as guidance.

---
### 🔬 **DETECTION RULES**
1.  Only report lesions inside regions where the heatmap intensity is at least {heatmap_thresh} (0.0–1.0 scale).
2.  Ignore candidate lesions smaller than {min_area_px} square pixels.
3.  Classify every detection with exactly one label: blackhead, whitehead, papule, pustule, nodule_or_cyst, inflammatory_area, uncertain.
4.  For each detection provide: a stable id, the center point (x, y in image pixels), an approximate radius, a confidence fraction from 0.0 to 1.0, and observed features (size_px, color_center_hex, raised).
5.  Add one short, practical advice sentence in Vietnamese per detection.
6.  Build an SVG overlay (512x512 canvas) with one circle per detection, colored by label severity.
7.  Write a short overall summary in Vietnamese (summary_vi).
8.  In meta, set image_id to "{image_id}", method to the detection approach used, thresholds to the values above, and notes to any caveats.

---
### 💬 **OUTPUT FORMAT**
Respond with a single JSON object that strictly adheres to the provided schema. Do not output anything else.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::analysis::{RiskLevel, VisualEvidence};

    #[test]
    fn analysis_prompt_embeds_threshold_as_fraction() {
        let prompt = skin_analysis_prompt(70);
        assert!(prompt.contains("0.70"));
        assert!(prompt.contains("Trán (Forehead)"));
        assert!(prompt.contains("Cằm (Chin)"));
    }

    #[test]
    fn heatmap_prompt_embeds_serialized_zones() {
        let zones = vec![ZoneAnalysis {
            zone: "Mũi".to_string(),
            condition: "Mụn đầu đen".to_string(),
            risk_level: RiskLevel::Medium,
            visual_evidence: VisualEvidence {
                visual_clues: String::new(),
                reasoning: String::new(),
                certainty: 0.8,
            },
            explanation: String::new(),
        }];
        let prompt = heatmap_context_prompt(&zones);
        assert!(prompt.contains("512x512"));
        assert!(prompt.contains("\"Mụn đầu đen\""));
        assert!(prompt.contains("ANALYSIS CONTEXT"));
    }

    #[test]
    fn advanced_prompt_threads_id_and_thresholds() {
        let prompt = advanced_analysis_prompt("img_123", 0.3, 50.0);
        assert!(prompt.contains("img_123"));
        assert!(prompt.contains("0.3"));
        assert!(prompt.contains("50"));
        assert!(prompt.contains("nodule_or_cyst"));
    }
}
