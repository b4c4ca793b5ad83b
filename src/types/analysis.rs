// src/types/analysis.rs
//! Schedule import and backend-side AI analysis payloads

use serde::{Deserialize, Serialize};

use super::calendar::{Disponibilite, Evenement};

// ===== Schedule import =====

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleProcessRequest {
    /// Raw text extracted from the timetable document
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCourse {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub subject: String,
    pub classroom: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleProcessResponse {
    #[serde(default)]
    pub courses: Vec<ScheduleCourse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventsRequest {
    pub courses: Vec<ScheduleCourse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_start_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventsResponse {
    #[serde(default)]
    pub events_created: u32,
    #[serde(default)]
    pub events: Vec<Evenement>,
}

// ===== Routine analysis =====

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineAnalysisRequest {
    pub evenements: Vec<Evenement>,
    pub disponibilites: Vec<Disponibilite>,
    pub date_debut: String,
    pub date_fin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineAnalysisResponse {
    pub score_equilibre: Option<f64>,
    pub resume: Option<String>,
    #[serde(default)]
    pub recommandations: Vec<String>,
    #[serde(default)]
    pub conflits: Vec<String>,
    /// Extra fields returned by the enhanced analysis
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ===== AI matching =====

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMatchingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferMatch {
    pub offer_id: String,
    pub score: f64,
    pub reasons: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiMatchingResponse {
    #[serde(default)]
    pub matches: Vec<OfferMatch>,
}

impl AiMatchingResponse {
    /// Matches sorted best first
    pub fn ranked(mut self) -> Vec<OfferMatch> {
        self.matches
            .sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        self.matches
    }
}
