use chrono::Utc;
use serde::Serialize;

use crate::types::analysis::{AnalysisResult, RiskLevel};

/// Body of the report webhook POST. Field names are the Vietnamese keys the
/// receiving automation expects, so they stay snake-case Vietnamese here.
#[derive(Debug, Clone, Serialize)]
pub struct ReportPayload {
    pub email: String,
    pub ten: String,
    pub loai_da: String,
    pub khu_vuc_mun: String,
    pub loai_mun: String,
    pub muc_do: String,
    pub routine: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub timestamp: String,
}

fn severity_vi(zones_risk: &[RiskLevel]) -> &'static str {
    if zones_risk.contains(&RiskLevel::High) {
        "Nặng"
    } else if zones_risk.contains(&RiskLevel::Medium) {
        "Trung bình"
    } else {
        "Nhẹ"
    }
}

impl ReportPayload {
    pub fn from_analysis(analysis: &AnalysisResult, user_email: &str) -> Self {
        let risk_levels: Vec<RiskLevel> =
            analysis.zones.iter().map(|zone| zone.risk_level).collect();

        let acne_zones: Vec<&crate::types::analysis::ZoneAnalysis> = analysis
            .zones
            .iter()
            .filter(|zone| zone.condition.to_lowercase().contains("mụn"))
            .collect();

        let khu_vuc_mun = {
            let joined = acne_zones
                .iter()
                .map(|zone| zone.zone.as_str())
                .collect::<Vec<_>>()
                .join(" và ");
            if joined.is_empty() {
                "Không có vùng mụn cụ thể".to_string()
            } else {
                joined
            }
        };

        let loai_mun = {
            let mut seen = Vec::new();
            for zone in &acne_zones {
                if !seen.contains(&zone.condition) {
                    seen.push(zone.condition.clone());
                }
            }
            if seen.is_empty() {
                "Không có".to_string()
            } else {
                seen.join(", ")
            }
        };

        ReportPayload {
            email: user_email.to_string(),
            ten: user_email
                .split('@')
                .next()
                .unwrap_or(user_email)
                .to_string(),
            loai_da: analysis
                .skin_type
                .map(|skin_type| skin_type.display_vi().to_string())
                .unwrap_or_else(|| "Không xác định".to_string()),
            khu_vuc_mun,
            loai_mun,
            muc_do: severity_vi(&risk_levels).to_string(),
            routine: analysis.recommendations.join("; "),
            image_url: analysis.heatmap_image_url.clone(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::analysis::{SkinType, VisualEvidence, ZoneAnalysis};

    fn zone(name: &str, condition: &str, risk: RiskLevel) -> ZoneAnalysis {
        ZoneAnalysis {
            zone: name.to_string(),
            condition: condition.to_string(),
            risk_level: risk,
            visual_evidence: VisualEvidence {
                visual_clues: String::new(),
                reasoning: String::new(),
                certainty: 0.9,
            },
            explanation: String::new(),
        }
    }

    fn analysis(zones: Vec<ZoneAnalysis>) -> AnalysisResult {
        AnalysisResult {
            skin_type: Some(SkinType::Oily),
            zones,
            overall_summary: String::new(),
            recommendations: vec!["Rửa mặt 2 lần/ngày".to_string(), "Dùng kem chống nắng".to_string()],
            safety_note: String::new(),
            is_uncertain: false,
            uncertainty_reason: None,
            confidence_score: 90.0,
            heatmap_image_url: None,
            expert_info: None,
            advanced_analysis: None,
        }
    }

    #[test]
    fn high_risk_zone_maps_to_nang() {
        let payload = ReportPayload::from_analysis(
            &analysis(vec![zone("Trán", "Mụn viêm", RiskLevel::High)]),
            "lan@example.com",
        );
        assert_eq!(payload.muc_do, "Nặng");
        assert_eq!(payload.ten, "lan");
        assert_eq!(payload.loai_da, "Da dầu");
    }

    #[test]
    fn medium_without_high_maps_to_trung_binh() {
        let payload = ReportPayload::from_analysis(
            &analysis(vec![
                zone("Trán", "Da khô", RiskLevel::Low),
                zone("Mũi", "Mụn đầu đen", RiskLevel::Medium),
            ]),
            "minh@example.com",
        );
        assert_eq!(payload.muc_do, "Trung bình");
    }

    #[test]
    fn low_only_maps_to_nhe() {
        let payload = ReportPayload::from_analysis(
            &analysis(vec![zone("Cằm", "Da khô", RiskLevel::Low)]),
            "an@example.com",
        );
        assert_eq!(payload.muc_do, "Nhẹ");
    }

    #[test]
    fn acne_zones_and_conditions_are_joined_and_deduped() {
        let payload = ReportPayload::from_analysis(
            &analysis(vec![
                zone("Trán", "Mụn viêm", RiskLevel::High),
                zone("Má trái", "Mụn viêm", RiskLevel::Medium),
                zone("Mũi", "Mụn đầu đen", RiskLevel::Medium),
                zone("Cằm", "Da khô", RiskLevel::Low),
            ]),
            "an@example.com",
        );
        assert_eq!(payload.khu_vuc_mun, "Trán và Má trái và Mũi");
        assert_eq!(payload.loai_mun, "Mụn viêm, Mụn đầu đen");
    }

    #[test]
    fn no_acne_zones_fall_back_to_placeholders() {
        let payload = ReportPayload::from_analysis(
            &analysis(vec![zone("Trán", "Da khô", RiskLevel::Low)]),
            "an@example.com",
        );
        assert_eq!(payload.khu_vuc_mun, "Không có vùng mụn cụ thể");
        assert_eq!(payload.loai_mun, "Không có");
    }
}
