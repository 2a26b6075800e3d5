use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkincareDirection {
    pub summary: String,
    pub priority_goals: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineStep {
    pub step: u32,
    pub name: String,
    pub product_type: String,
    pub instructions: String,
    pub frequency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalizedRoutine {
    pub morning: Vec<RoutineStep>,
    pub evening: Vec<RoutineStep>,
    pub weekly: Vec<RoutineStep>,
    pub tips: Vec<String>,
    pub warnings: Vec<String>,
}

/// Simplified routine inside a coaching reply; steps are plain strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineForCoach {
    pub created: bool,
    pub morning: Vec<String>,
    pub night: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachingResult {
    pub coach_message: String,
    pub explanation: String,
    pub escalation: bool,
    pub routine: RoutineForCoach,
    pub micro_education: String,
    pub follow_up: String,
}
