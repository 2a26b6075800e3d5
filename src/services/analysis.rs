use chrono::Utc;
use tracing::warn;

use crate::config::Config;
use crate::error::DermaError;
use crate::llm::{GenerateRequest, ModelClient, Part};
use crate::prompts::analysis::{
    advanced_analysis_prompt, heatmap_context_prompt, skin_analysis_prompt,
};
use crate::rag::KnowledgeBase;
use crate::schemas::{ADVANCED_RESPONSE_SCHEMA, ANALYSIS_RESPONSE_SCHEMA};
use crate::services::rag::get_expert_info_for_condition;
use crate::services::{generation_error, parse_structured};
use crate::types::advanced::{AdvancedAnalysisResult, AdvancedThresholds};
use crate::types::analysis::{AnalysisResult, ZoneAnalysis};
use crate::utils::image::{is_plausible_base64, parse_base64_image, strip_code_fence, ImagePayload};

const ANALYZE_ERROR_VI: &str = "Không thể phân tích hình ảnh. Vui lòng thử lại.";
const HEATMAP_ERROR_VI: &str = "Không thể tạo heatmap. Vui lòng thử lại.";

fn checked_image(image_data: &str, user_message: &str) -> Result<ImagePayload, DermaError> {
    let image = parse_base64_image(image_data);
    if !is_plausible_base64(&image.base64) {
        return Err(DermaError::validation(
            user_message,
            "image payload is not valid base64",
        ));
    }
    Ok(image)
}

/// Zone-by-zone skin analysis of one facial image. `confidence_threshold`
/// is a 0–100 percentage; `None` falls back to the configured default.
pub async fn analyze_skin_image(
    client: &dyn ModelClient,
    config: &Config,
    image_data: &str,
    confidence_threshold: Option<u8>,
) -> Result<AnalysisResult, DermaError> {
    let threshold = confidence_threshold.unwrap_or(config.default_confidence_threshold);
    let image = checked_image(image_data, ANALYZE_ERROR_VI)?;

    let request = GenerateRequest::new(
        &config.gemini_model,
        vec![
            Part::text(skin_analysis_prompt(threshold)),
            Part::inline_data(image.mime_type, image.base64),
        ],
    )
    .with_schema(&ANALYSIS_RESPONSE_SCHEMA)
    .with_operation("analyze_skin_image");

    let raw = client
        .generate_content(request)
        .await
        .map_err(|err| generation_error(ANALYZE_ERROR_VI, err))?;

    let mut result: AnalysisResult = parse_structured(&raw, ANALYZE_ERROR_VI)?;
    result
        .validate()
        .map_err(|detail| DermaError::validation(ANALYZE_ERROR_VI, detail))?;
    Ok(result)
}

/// SVG heatmap overlay for the analyzed zones. Plain-text generation; the
/// only post-processing is stripping a stray code fence.
pub async fn generate_heatmap_overlay(
    client: &dyn ModelClient,
    config: &Config,
    image_data: &str,
    zones: &[ZoneAnalysis],
) -> Result<String, DermaError> {
    let image = checked_image(image_data, HEATMAP_ERROR_VI)?;

    let request = GenerateRequest::new(
        &config.gemini_model,
        vec![
            Part::text(heatmap_context_prompt(zones)),
            Part::inline_data(image.mime_type, image.base64),
        ],
    )
    .with_operation("generate_heatmap_overlay");

    let raw = client
        .generate_content(request)
        .await
        .map_err(|err| generation_error(HEATMAP_ERROR_VI, err))?;

    let svg = strip_code_fence(&raw);
    if !svg.to_lowercase().contains("<svg") {
        return Err(DermaError::parse(
            HEATMAP_ERROR_VI,
            format!("reply did not contain SVG markup: {}", crate::utils::truncate_for_log(&svg, 200)),
        ));
    }
    Ok(svg)
}

#[derive(Debug, Clone)]
pub struct AdvancedAnalysisOptions {
    /// Identifier echoed into the result; defaults to `img_<epoch-ms>`.
    pub image_id: Option<String>,
    pub heatmap_thresh: f64,
    pub min_area_px: f64,
}

impl Default for AdvancedAnalysisOptions {
    fn default() -> Self {
        AdvancedAnalysisOptions {
            image_id: None,
            heatmap_thresh: 0.3,
            min_area_px: 50.0,
        }
    }
}

/// Lesion-level detection pass over the original photo and its heatmap
/// overlay. The requested image id and thresholds are authoritative: the
/// model's echo of them is overwritten after parsing.
pub async fn perform_advanced_analysis(
    client: &dyn ModelClient,
    config: &Config,
    image_data: &str,
    heatmap_image_data: &str,
    options: AdvancedAnalysisOptions,
) -> Result<AdvancedAnalysisResult, DermaError> {
    let image_id = options
        .image_id
        .clone()
        .unwrap_or_else(|| format!("img_{}", Utc::now().timestamp_millis()));
    let image = checked_image(image_data, ANALYZE_ERROR_VI)?;
    let heatmap = checked_image(heatmap_image_data, ANALYZE_ERROR_VI)?;

    let request = GenerateRequest::new(
        &config.gemini_model,
        vec![
            Part::text(advanced_analysis_prompt(
                &image_id,
                options.heatmap_thresh,
                options.min_area_px,
            )),
            Part::inline_data(image.mime_type, image.base64),
            Part::inline_data(heatmap.mime_type, heatmap.base64),
        ],
    )
    .with_schema(&ADVANCED_RESPONSE_SCHEMA)
    .with_operation("perform_advanced_analysis");

    let raw = client
        .generate_content(request)
        .await
        .map_err(|err| generation_error(ANALYZE_ERROR_VI, err))?;

    let mut result: AdvancedAnalysisResult = parse_structured(&raw, ANALYZE_ERROR_VI)?;
    result
        .validate()
        .map_err(|detail| DermaError::validation(ANALYZE_ERROR_VI, detail))?;

    let requested = AdvancedThresholds {
        heatmap_thresh: options.heatmap_thresh,
        min_area_px: options.min_area_px,
    };
    if result.meta.thresholds != requested {
        warn!(
            "Model echoed thresholds {:?}, pinning requested {:?}",
            result.meta.thresholds, requested
        );
    }
    result.meta.thresholds = requested;
    result.image_id = image_id;
    Ok(result)
}

/// Attaches expert background for the most severe zone's condition. This is
/// an enrichment step: a retrieval or model failure here is logged and the
/// analysis continues without it.
pub async fn enrich_with_expert_info(
    client: &dyn ModelClient,
    config: &Config,
    kb: &KnowledgeBase,
    analysis: &mut AnalysisResult,
) {
    let Some(zone) = analysis.most_severe_zone() else {
        return;
    };
    let condition = zone.condition.clone();

    match get_expert_info_for_condition(client, config, kb, &condition).await {
        Ok(info) => analysis.expert_info = Some(info),
        Err(err) => warn!(
            "Expert info enrichment for '{condition}' failed: {} ({})",
            err.user_message(),
            err.detail()
        ),
    }
}
