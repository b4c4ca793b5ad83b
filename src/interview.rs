// src/interview.rs
//! AI interview training - client for the external inference service and
//! the locally kept transcript of a practice session.
//!
//! Speech-to-text, scoring and dialogue generation all happen server-side;
//! this module only shapes requests and keeps the running history.

use reqwest::multipart::{Form, Part};
use tracing::{debug, info};
use uuid::Uuid;

use crate::client::{content_type_for, ApiClient};
use crate::error::{ClientError, ClientResult};
use crate::types::interview::{
    AnalyzeInterviewRequest, ChatReply, Invitation, InvitationDecisionRequest, InterviewAnalysis,
    InterviewMode, PendingInvitations, SendInvitationRequest, Speaker, TextChatRequest, Turn,
    VoiceChatReply,
};

const MAX_MESSAGE_CHARS: usize = 4000;

/// Transcript of one practice interview
#[derive(Debug, Clone)]
pub struct InterviewSession {
    pub session_id: String,
    pub user_id: String,
    pub mode: InterviewMode,
    pub offer_id: Option<String>,
    turns: Vec<Turn>,
    finished: bool,
}

impl InterviewSession {
    pub fn new(user_id: impl Into<String>, mode: InterviewMode) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            mode,
            offer_id: None,
            turns: Vec::new(),
            finished: false,
        }
    }

    pub fn for_offer(mut self, offer_id: impl Into<String>) -> Self {
        self.offer_id = Some(offer_id.into());
        self
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Request for the next text turn. History excludes the new message.
    pub fn text_request(&self, message: &str) -> ClientResult<TextChatRequest> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ClientError::Validation("message cannot be empty".to_string()));
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(ClientError::Validation(format!(
                "message exceeds maximum length of {} characters",
                MAX_MESSAGE_CHARS
            )));
        }
        if self.finished {
            return Err(ClientError::Validation(
                "interview session is already finished".to_string(),
            ));
        }

        Ok(TextChatRequest {
            user_id: self.user_id.clone(),
            session_id: self.session_id.clone(),
            mode: self.mode,
            message: message.to_string(),
            history: self.turns.clone(),
            offer_id: self.offer_id.clone(),
        })
    }

    /// Record a completed exchange
    pub fn record(&mut self, user_message: &str, reply: &str, finished: bool) {
        self.turns.push(Turn {
            role: Speaker::User,
            content: user_message.trim().to_string(),
        });
        self.turns.push(Turn {
            role: Speaker::Assistant,
            content: reply.to_string(),
        });
        self.finished = finished;
    }

    pub fn analysis_request(&self) -> AnalyzeInterviewRequest {
        AnalyzeInterviewRequest {
            user_id: self.user_id.clone(),
            session_id: self.session_id.clone(),
            mode: self.mode,
            transcript: self.turns.clone(),
        }
    }
}

/// Client for the AI interview host. Shares the HTTP client and token of
/// the backend [`ApiClient`].
#[derive(Debug, Clone)]
pub struct InterviewClient {
    api: ApiClient,
}

impl InterviewClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Send a text turn and append the exchange to the session
    pub async fn send_text(
        &self,
        session: &mut InterviewSession,
        message: &str,
    ) -> ClientResult<ChatReply> {
        let request = session.text_request(message)?;
        let url = self.api.endpoints().interview_text_chat();
        debug!(
            "Interview turn {} for session {}",
            session.turns().len() / 2 + 1,
            session.session_id
        );

        let reply: ChatReply = self.api.post_json(&url, &request).await?;
        session.record(&request.message, &reply.reply, reply.is_finished);
        Ok(reply)
    }

    /// Send a recorded answer; the service transcribes it and replies
    pub async fn send_voice(
        &self,
        session: &mut InterviewSession,
        audio: Vec<u8>,
        file_name: &str,
    ) -> ClientResult<VoiceChatReply> {
        if session.is_finished() {
            return Err(ClientError::Validation(
                "interview session is already finished".to_string(),
            ));
        }
        let content_type = content_type_for(file_name)?;
        let history = serde_json::to_string(session.turns())?;

        let part = Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| ClientError::Validation(format!("Failed to create multipart: {}", e)))?;
        let form = Form::new()
            .part("audio", part)
            .text("user_id", session.user_id.clone())
            .text("session_id", session.session_id.clone())
            .text("mode", session.mode.as_str())
            .text("history", history);

        let url = self.api.endpoints().interview_voice_chat();
        info!("Sending voice turn for session {}", session.session_id);

        let reply: VoiceChatReply = self.api.post_multipart(&url, form).await?;
        session.record(&reply.transcript, &reply.reply, reply.is_finished);
        Ok(reply)
    }

    pub async fn analyze(&self, session: &InterviewSession) -> ClientResult<InterviewAnalysis> {
        if session.turns().is_empty() {
            return Err(ClientError::Validation(
                "cannot analyze an empty interview".to_string(),
            ));
        }
        let url = self.api.endpoints().analyze_interview();
        info!(
            "Requesting analysis of session {} ({} turns)",
            session.session_id,
            session.turns().len()
        );
        self.api.post_json(&url, &session.analysis_request()).await
    }

    // ===== Invitations =====

    pub async fn send_invitation(&self, request: &SendInvitationRequest) -> ClientResult<Invitation> {
        let url = self.api.endpoints().send_interview_invitation();
        self.api.post_json(&url, request).await
    }

    pub async fn accept_invitation(&self, invitation_id: &str, user_id: &str) -> ClientResult<Invitation> {
        let url = self.api.endpoints().accept_interview_invitation();
        self.decide(&url, invitation_id, user_id).await
    }

    pub async fn reject_invitation(&self, invitation_id: &str, user_id: &str) -> ClientResult<Invitation> {
        let url = self.api.endpoints().reject_interview_invitation();
        self.decide(&url, invitation_id, user_id).await
    }

    async fn decide(&self, url: &str, invitation_id: &str, user_id: &str) -> ClientResult<Invitation> {
        let request = InvitationDecisionRequest {
            invitation_id: invitation_id.to_string(),
            user_id: user_id.to_string(),
        };
        self.api.post_json(url, &request).await
    }

    pub async fn pending_invitations(&self, user_id: &str) -> ClientResult<Vec<Invitation>> {
        let url = self.api.endpoints().pending_invitations(user_id)?;
        let pending: PendingInvitations = self.api.get(&url).await?;
        Ok(pending.invitations)
    }
}
