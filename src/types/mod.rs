pub mod advanced;
pub mod analysis;
pub mod rag;
pub mod report;
pub mod skincare;

pub use advanced::{
    AcneDetection, AcneLabel, AdvancedAnalysisResult, AdvancedMeta, AdvancedThresholds,
    DetectionFeatures, Point,
};
pub use analysis::{AnalysisResult, RiskLevel, SkinType, VisualEvidence, ZoneAnalysis};
pub use rag::{ChatImage, ChatMessage, ChatRole, RagResult, RagSource};
pub use report::ReportPayload;
pub use skincare::{
    CoachingResult, PersonalizedRoutine, RoutineForCoach, RoutineStep, SkincareDirection,
};

/// Canonical scale for per-zone certainty and per-detection confidence is
/// 0.0–1.0. The model occasionally answers in percent despite the schema
/// description; values in (1, 100] are treated as percentages and scaled
/// down here, at the single conversion boundary. Anything else is rejected.
pub fn normalize_unit_interval(value: f64) -> Result<f64, String> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else if value > 1.0 && value <= 100.0 {
        Ok(value / 100.0)
    } else {
        Err(format!("value {value} is outside [0, 1] and (1, 100]"))
    }
}
