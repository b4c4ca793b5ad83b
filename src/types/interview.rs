// src/types/interview.rs
//! Payloads exchanged with the external AI interview service

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewMode {
    Coaching,
    EmployerInterview,
}

impl InterviewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            InterviewMode::Coaching => "coaching",
            InterviewMode::EmployerInterview => "employer_interview",
        }
    }
}

impl fmt::Display for InterviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coaching" => Ok(InterviewMode::Coaching),
            "employer_interview" | "employer" => Ok(InterviewMode::EmployerInterview),
            other => Err(format!("unknown interview mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Speaker,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextChatRequest {
    pub user_id: String,
    pub session_id: String,
    pub mode: InterviewMode,
    pub message: String,
    pub history: Vec<Turn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(alias = "response")]
    pub reply: String,
    pub audio_url: Option<String>,
    #[serde(default)]
    pub is_finished: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceChatReply {
    pub transcript: String,
    #[serde(alias = "response")]
    pub reply: String,
    pub audio_url: Option<String>,
    #[serde(default)]
    pub is_finished: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeInterviewRequest {
    pub user_id: String,
    pub session_id: String,
    pub mode: InterviewMode,
    pub transcript: Vec<Turn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewAnalysis {
    pub overall_score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub summary: Option<String>,
}

// ===== Invitations =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendInvitationRequest {
    pub employer_id: String,
    pub candidate_id: String,
    pub offer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvitationDecisionRequest {
    pub invitation_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    #[serde(alias = "_id", alias = "id")]
    pub invitation_id: String,
    pub employer_id: String,
    pub candidate_id: String,
    pub offer_id: Option<String>,
    pub message: Option<String>,
    pub status: InvitationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingInvitations {
    #[serde(default)]
    pub invitations: Vec<Invitation>,
}
