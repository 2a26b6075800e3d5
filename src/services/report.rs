use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::DermaError;
use crate::llm::{GenerateRequest, ModelClient, Part};
use crate::prompts::report::{email_confirmation_prompt, REPORT_SYSTEM_INSTRUCTION};
use crate::types::analysis::AnalysisResult;
use crate::types::report::ReportPayload;
use crate::utils::http::get_http_client;

const REPORT_ERROR_VI: &str = "Không thể gửi báo cáo qua email. Vui lòng thử lại sau.";

const CONFIRMATION_FALLBACK_VI: &str =
    "Báo cáo chi tiết đã được gửi tới email của bạn rồi đó! Nhớ check mail nha! 💌";

/// Posts the report to the mail-automation webhook. Any failure, transport
/// or HTTP, surfaces as one Downstream error; the webhook body is never
/// shown to the user.
pub async fn send_report_to_webhook(
    config: &Config,
    payload: &ReportPayload,
) -> Result<(), DermaError> {
    let response = get_http_client()
        .post(&config.report_webhook_url)
        .json(payload)
        .send()
        .await
        .map_err(|err| {
            error!("Report webhook request failed: {err}");
            DermaError::downstream(REPORT_ERROR_VI, err)
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!("Report webhook answered {status}: {body}");
        return Err(DermaError::downstream(
            REPORT_ERROR_VI,
            format!("webhook status {status}"),
        ));
    }

    info!("Report for {} delivered to webhook", payload.email);
    Ok(())
}

/// Cheerful "check your mail" message. Generation failure falls back to a
/// canned line: by the time this runs the report is already sent, so the
/// confirmation must not fail the whole flow.
pub async fn generate_email_confirmation_message(
    client: &dyn ModelClient,
    config: &Config,
    overall_summary: &str,
) -> String {
    let request = GenerateRequest::new(
        &config.gemini_flash_model,
        vec![Part::text(email_confirmation_prompt(overall_summary))],
    )
    .with_system_instruction(REPORT_SYSTEM_INSTRUCTION)
    .with_operation("generate_email_confirmation_message");

    match client.generate_content(request).await {
        Ok(text) => {
            let trimmed = text.trim().to_string();
            if trimmed.is_empty() {
                CONFIRMATION_FALLBACK_VI.to_string()
            } else {
                trimmed
            }
        }
        Err(err) => {
            warn!("Email confirmation generation failed, using fallback: {err:#}");
            CONFIRMATION_FALLBACK_VI.to_string()
        }
    }
}

/// Full report flow: build the payload from the analysis, deliver it, then
/// return the confirmation message for the UI.
pub async fn send_analysis_report(
    client: &dyn ModelClient,
    config: &Config,
    analysis: &AnalysisResult,
    user_email: &str,
) -> Result<String, DermaError> {
    let payload = ReportPayload::from_analysis(analysis, user_email);
    send_report_to_webhook(config, &payload).await?;
    Ok(generate_email_confirmation_message(client, config, &analysis.overall_summary).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::ScriptedClient;

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

    #[tokio::test]
    async fn confirmation_uses_model_text_when_available() {
        let client = ScriptedClient::replying("Đã gửi báo cáo cho bồ rồi nè 💌");
        let config = test_config();
        let message =
            generate_email_confirmation_message(&client, &config, "Da bạn đang hồi phục tốt.")
                .await;
        assert_eq!(message, "Đã gửi báo cáo cho bồ rồi nè 💌");

        let request = client.last_request();
        assert_eq!(request.model, "gemini-2.5-flash");
        assert!(request.response_schema.is_none());
    }

    #[tokio::test]
    async fn confirmation_falls_back_on_failure() {
        let client = ScriptedClient::failing("socket hang up");
        let config = test_config();
        let message =
            generate_email_confirmation_message(&client, &config, "Da bạn đang hồi phục tốt.")
                .await;
        assert_eq!(message, CONFIRMATION_FALLBACK_VI);
    }
}
