use serde_json::json;
use tracing::warn;

use crate::config::Config;
use crate::error::DermaError;
use crate::llm::{GenerateRequest, ModelClient, Part};
use crate::prompts::skincare::{
    coaching_prompt, personalized_routine_prompt, skincare_direction_prompt,
    COACHING_SYSTEM_INSTRUCTION,
};
use crate::schemas::{COACHING_RESULT_SCHEMA, PERSONALIZED_ROUTINE_SCHEMA, SKINCARE_DIRECTION_SCHEMA};
use crate::services::{generation_error, parse_structured};
use crate::types::analysis::{AnalysisResult, RiskLevel, SkinType};
use crate::types::skincare::{CoachingResult, PersonalizedRoutine, SkincareDirection};

const DIRECTION_ERROR_VI: &str = "Không thể xác định định hướng chăm sóc da. Vui lòng thử lại.";
const ROUTINE_ERROR_VI: &str = "Không thể tạo chu trình chăm sóc. Vui lòng thử lại.";
const COACHING_ERROR_VI: &str = "Không thể nhận lời khuyên từ AI Coach. Vui lòng thử lại.";

/// Condensed view of an analysis for prompt embedding. Zones keep only the
/// fields the downstream prompt reasons about, which bounds prompt size no
/// matter how chatty the original analysis was.
fn condensed_analysis_summary(analysis: &AnalysisResult) -> String {
    let zones: Vec<_> = analysis
        .zones
        .iter()
        .map(|zone| {
            json!({
                "zone": zone.zone,
                "condition": zone.condition,
                "riskLevel": zone.risk_level,
                "certainty": zone.visual_evidence.certainty,
            })
        })
        .collect();

    json!({
        "skinType": analysis.skin_type,
        "zones": zones,
        "overallSummary": analysis.overall_summary,
    })
    .to_string()
}

/// Main skincare focus derived from an analysis. Runs on the flash model;
/// this is a short text-only task.
pub async fn get_skincare_direction(
    client: &dyn ModelClient,
    config: &Config,
    analysis: &AnalysisResult,
) -> Result<SkincareDirection, DermaError> {
    let summary = condensed_analysis_summary(analysis);
    let request = GenerateRequest::new(
        &config.gemini_flash_model,
        vec![Part::text(skincare_direction_prompt(&summary))],
    )
    .with_schema(&SKINCARE_DIRECTION_SCHEMA)
    .with_operation("get_skincare_direction");

    let raw = client
        .generate_content(request)
        .await
        .map_err(|err| generation_error(DIRECTION_ERROR_VI, err))?;
    parse_structured(&raw, DIRECTION_ERROR_VI)
}

/// Full morning/evening/weekly routine for one direction and skin type.
pub async fn get_personalized_skincare_routine(
    client: &dyn ModelClient,
    config: &Config,
    direction: &SkincareDirection,
    skin_type: Option<SkinType>,
) -> Result<PersonalizedRoutine, DermaError> {
    let request = GenerateRequest::new(
        &config.gemini_flash_model,
        vec![Part::text(personalized_routine_prompt(direction, skin_type))],
    )
    .with_schema(&PERSONALIZED_ROUTINE_SCHEMA)
    .with_operation("get_personalized_skincare_routine");

    let raw = client
        .generate_content(request)
        .await
        .map_err(|err| generation_error(ROUTINE_ERROR_VI, err))?;
    parse_structured(&raw, ROUTINE_ERROR_VI)
}

/// True when the coaching policy requires escalation instead of a routine.
fn requires_escalation(analysis: &AnalysisResult) -> bool {
    analysis
        .zones
        .iter()
        .any(|zone| zone.risk_level == RiskLevel::High)
}

/// Playful coaching reply for an analysis. Escalation is a policy decision,
/// not a model decision: any High-risk zone forces `escalation = true` and
/// suppresses the routine, whatever the model said.
pub async fn get_coaching_advice(
    client: &dyn ModelClient,
    config: &Config,
    analysis: &AnalysisResult,
) -> Result<CoachingResult, DermaError> {
    let summary = condensed_analysis_summary(analysis);
    let request = GenerateRequest::new(
        &config.gemini_model,
        vec![Part::text(coaching_prompt(&summary))],
    )
    .with_schema(&COACHING_RESULT_SCHEMA)
    .with_system_instruction(COACHING_SYSTEM_INSTRUCTION)
    .with_operation("get_coaching_advice");

    let raw = client
        .generate_content(request)
        .await
        .map_err(|err| generation_error(COACHING_ERROR_VI, err))?;
    let mut result: CoachingResult = parse_structured(&raw, COACHING_ERROR_VI)?;

    let must_escalate = requires_escalation(analysis);
    if result.escalation != must_escalate {
        warn!(
            "Model set escalation={}, policy requires {}",
            result.escalation, must_escalate
        );
        result.escalation = must_escalate;
    }
    if result.escalation {
        result.routine.created = false;
        result.routine.morning.clear();
        result.routine.night.clear();
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::ScriptedClient;
    use crate::types::analysis::{VisualEvidence, ZoneAnalysis};
    use serde_json::json;

    fn test_config() -> Config {
        Config {
            log_level: "info".to_string(),
            gemini_api_key: "test-key".to_string(),
            gemini_model: "gemini-2.5-pro".to_string(),
            gemini_flash_model: "gemini-2.5-flash".to_string(),
            gemini_temperature: 0.4,
            gemini_top_k: 40,
            gemini_top_p: 0.95,
            gemini_max_output_tokens: 8192,
            gemini_request_timeout_secs: 150,
            report_webhook_url: "https://example.com/hook".to_string(),
            rag_top_k: 3,
            default_confidence_threshold: 70,
        }
    }

    fn zone(name: &str, risk: RiskLevel) -> ZoneAnalysis {
        ZoneAnalysis {
            zone: name.to_string(),
            condition: "Mụn viêm".to_string(),
            risk_level: risk,
            visual_evidence: VisualEvidence {
                visual_clues: String::new(),
                reasoning: String::new(),
                certainty: 0.8,
            },
            explanation: String::new(),
        }
    }

    fn analysis(zones: Vec<ZoneAnalysis>) -> AnalysisResult {
        AnalysisResult {
            skin_type: Some(SkinType::Oily),
            zones,
            overall_summary: "Da dầu, có mụn.".to_string(),
            recommendations: vec![],
            safety_note: String::new(),
            is_uncertain: false,
            uncertainty_reason: None,
            confidence_score: 85.0,
            heatmap_image_url: None,
            expert_info: None,
            advanced_analysis: None,
        }
    }

    fn coaching_reply(escalation: bool, created: bool) -> String {
        let morning: Vec<&str> = if created {
            vec!["Rửa mặt", "Dưỡng ẩm", "Chống nắng"]
        } else {
            vec![]
        };
        let night: Vec<&str> = if created {
            vec!["Tẩy trang", "Rửa mặt", "Dưỡng ẩm"]
        } else {
            vec![]
        };
        json!({
            "escalation": escalation,
            "coach_message": "Chào bồ iu ✨",
            "explanation": "Da bồ đang ổn áp lắm nè.",
            "routine": { "created": created, "morning": morning, "night": night },
            "micro_education": "Serum như sinh tố cho da á 🍓",
            "follow_up": "Nhắn tui sau 3 ngày nha ✨"
        })
        .to_string()
    }

    #[tokio::test]
    async fn direction_uses_flash_model_and_condensed_summary() {
        let reply = json!({
            "summary": "Tập trung kiểm soát dầu và trị mụn.",
            "priorityGoals": ["Kiểm soát dầu", "Giảm viêm"]
        })
        .to_string();
        let client = ScriptedClient::replying(&reply);
        let config = test_config();

        let direction =
            get_skincare_direction(&client, &config, &analysis(vec![zone("Trán", RiskLevel::Medium)]))
                .await
                .unwrap();
        assert_eq!(direction.priority_goals.len(), 2);

        let request = client.last_request();
        assert_eq!(request.model, "gemini-2.5-flash");
        match &request.parts[0] {
            crate::llm::Part::Text(text) => {
                assert!(text.contains("\"overallSummary\""));
                assert!(text.contains("Mụn viêm"));
                // Condensed summary drops free-text evidence fields.
                assert!(!text.contains("visualClues"));
            }
            other => panic!("expected text part, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn high_risk_zone_forces_escalation_and_clears_routine() {
        // Model claims everything is fine; a High zone overrules it.
        let client = ScriptedClient::replying(&coaching_reply(false, true));
        let config = test_config();

        let result = get_coaching_advice(
            &client,
            &config,
            &analysis(vec![zone("Trán", RiskLevel::Low), zone("Mũi", RiskLevel::High)]),
        )
        .await
        .unwrap();

        assert!(result.escalation);
        assert!(!result.routine.created);
        assert!(result.routine.morning.is_empty());
        assert!(result.routine.night.is_empty());
    }

    #[tokio::test]
    async fn low_risk_keeps_model_routine() {
        let client = ScriptedClient::replying(&coaching_reply(false, true));
        let config = test_config();

        let result = get_coaching_advice(
            &client,
            &config,
            &analysis(vec![zone("Trán", RiskLevel::Low)]),
        )
        .await
        .unwrap();

        assert!(!result.escalation);
        assert!(result.routine.created);
        assert_eq!(result.routine.morning.len(), 3);
    }

    #[tokio::test]
    async fn routine_failure_is_translated() {
        let client = ScriptedClient::failing("quota exceeded");
        let config = test_config();
        let direction = SkincareDirection {
            summary: "Kiểm soát dầu.".to_string(),
            priority_goals: vec!["Kiểm soát dầu".to_string()],
        };

        let err = get_personalized_skincare_routine(&client, &config, &direction, None)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), ROUTINE_ERROR_VI);
    }
}
