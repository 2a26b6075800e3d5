use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::advanced::AdvancedAnalysisResult;
use crate::types::rag::RagResult;
use crate::types::normalize_unit_interval;

/// Per-zone risk. The derived ordering is the severity ordering used
/// everywhere: Low < Medium < High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Overall skin type, carried in the model's Vietnamese-tagged wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkinType {
    #[serde(rename = "dầu (oily)")]
    Oily,
    #[serde(rename = "khô (dry)")]
    Dry,
    #[serde(rename = "nhạy cảm (sensitive)")]
    Sensitive,
    #[serde(rename = "hỗn hợp (combination)")]
    Combination,
}

impl SkinType {
    pub fn display_vi(&self) -> &'static str {
        match self {
            SkinType::Oily => "Da dầu",
            SkinType::Dry => "Da khô",
            SkinType::Sensitive => "Da nhạy cảm",
            SkinType::Combination => "Da hỗn hợp",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualEvidence {
    pub visual_clues: String,
    pub reasoning: String,
    /// Canonical 0.0–1.0 after validation.
    pub certainty: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneAnalysis {
    pub zone: String,
    pub condition: String,
    pub risk_level: RiskLevel,
    pub visual_evidence: VisualEvidence,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub skin_type: Option<SkinType>,
    pub zones: Vec<ZoneAnalysis>,
    pub overall_summary: String,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub safety_note: String,
    pub is_uncertain: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncertainty_reason: Option<String>,
    /// 0–100 for the whole analysis; zone-level certainty is 0–1.
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expert_info: Option<RagResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_analysis: Option<AdvancedAnalysisResult>,
}

impl AnalysisResult {
    /// Range checks the schema cannot express. Zone certainty is normalized
    /// to 0–1 here; the overall confidence score must already be 0–100.
    pub fn validate(&mut self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.confidence_score) {
            return Err(format!(
                "confidenceScore {} is outside [0, 100]",
                self.confidence_score
            ));
        }

        for zone in &mut self.zones {
            zone.visual_evidence.certainty = normalize_unit_interval(zone.visual_evidence.certainty)
                .map_err(|err| format!("zone '{}' certainty: {}", zone.zone, err))?;
        }

        if self.is_uncertain
            && self
                .uncertainty_reason
                .as_deref()
                .unwrap_or("")
                .trim()
                .is_empty()
        {
            warn!("Analysis flagged uncertain without an uncertaintyReason");
        }

        Ok(())
    }

    /// First zone carrying the maximum risk level present, or the first zone
    /// when the list is non-empty but flat.
    pub fn most_severe_zone(&self) -> Option<&ZoneAnalysis> {
        let max_level = self.zones.iter().map(|zone| zone.risk_level).max()?;
        self.zones.iter().find(|zone| zone.risk_level == max_level)
    }
}
