// src/client.rs
//! HTTP client for the marketplace backend - one `reqwest::Client`, one
//! configuration, typed operations over the resolved endpoints.
//!
//! Every call is a single-shot request: build, send, map the status, decode.

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info, trace};

use crate::config::ApiConfig;
use crate::endpoints::Endpoints;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use crate::types::{
    analysis::{
        AiMatchingRequest, AiMatchingResponse, CreateEventsRequest, CreateEventsResponse,
        RoutineAnalysisRequest, RoutineAnalysisResponse, ScheduleProcessRequest,
        ScheduleProcessResponse,
    },
    calendar::{Disponibilite, DisponibiliteRequest, Evenement, EvenementRequest},
    chat::{
        CanCallResponse, Chat, ChatMessage, CreateChatRequest, MessagePage, SendMessageRequest,
        UploadResponse,
    },
    offre::{CreateOffreRequest, LikeResponse, Offre, UpdateOffreRequest},
    preferences::{PreferenceStepRequest, PreferencesProgress, StudentPreferences},
    reclamation::{
        CreateReclamationRequest, Reclamation, StatBucket, StatsKind, UpdateReclamationRequest,
    },
    user::{
        AuthResponse, EmailExistsResponse, GoogleAuthRequest, ImageResponse, LoginRequest,
        RegisterRequest, ResetPasswordRequest, UpdateImageRequest, UpdateUserRequest, User,
    },
};

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    endpoints: Endpoints,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given configuration
    pub fn new(config: ApiConfig) -> ClientResult<Self> {
        if !config.is_configured() {
            return Err(ClientError::Config(format!(
                "base URL is not a valid absolute URL: '{}'",
                config.base_url()
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "API client ready: {} ({})",
            config.api_root(),
            config.environment
        );

        Ok(Self {
            client,
            endpoints: Endpoints::new(&config),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // ===== Request plumbing =====

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and return the raw body of a successful response
    async fn execute(&self, builder: RequestBuilder, url: &str) -> ClientResult<String> {
        let response = builder.send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            ClientError::from(e)
        })?;

        let status = response.status();
        trace!("Response status from {}: {}", url, status);

        let body = response.text().await.map_err(ClientError::from)?;

        if status.is_success() {
            Ok(body)
        } else {
            error!("Service error response {} from {}: {}", status, url, body);
            Err(ClientError::from_status(status, &body))
        }
    }

    pub(crate) async fn send_json<R>(&self, builder: RequestBuilder, url: &str) -> ClientResult<R>
    where
        R: DeserializeOwned,
    {
        let body = self.execute(builder, url).await?;
        serde_json::from_str(&body).map_err(|e| {
            ClientError::Decode(format!("{} (response from {}: {})", e, url, body))
        })
    }

    /// Generic GET request
    pub async fn get<R>(&self, url: &str) -> ClientResult<R>
    where
        R: DeserializeOwned,
    {
        trace!("GET {}", url);
        self.send_json(self.request(Method::GET, url), url).await
    }

    /// Generic POST request with JSON
    pub async fn post_json<T, R>(&self, url: &str, payload: &T) -> ClientResult<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        trace!("POST {}", url);
        self.send_json(self.request(Method::POST, url).json(payload), url)
            .await
    }

    /// POST without a body, used by the action endpoints (like, block, ...)
    pub async fn post_empty<R>(&self, url: &str) -> ClientResult<R>
    where
        R: DeserializeOwned,
    {
        trace!("POST {}", url);
        self.send_json(self.request(Method::POST, url), url).await
    }

    /// Generic PATCH request with JSON
    pub async fn patch_json<T, R>(&self, url: &str, payload: &T) -> ClientResult<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        trace!("PATCH {}", url);
        self.send_json(self.request(Method::PATCH, url).json(payload), url)
            .await
    }

    /// DELETE, ignoring whatever body the server sends back
    pub async fn delete(&self, url: &str) -> ClientResult<()> {
        trace!("DELETE {}", url);
        self.execute(self.request(Method::DELETE, url), url).await?;
        Ok(())
    }

    /// Multipart upload of a single file part
    pub async fn post_multipart<R>(&self, url: &str, form: Form) -> ClientResult<R>
    where
        R: DeserializeOwned,
    {
        trace!("POST multipart {}", url);
        self.send_json(self.request(Method::POST, url).multipart(form), url)
            .await
    }

    // ===== Auth =====

    /// Log in and keep the returned token for subsequent requests
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<Session> {
        let url = self.endpoints.login();
        info!("Logging in as {}", email);

        let auth: AuthResponse = self
            .post_json(
                &url,
                &LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                },
            )
            .await?;

        self.token = Some(auth.access_token.clone());
        Ok(Session::from_auth(auth))
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<User> {
        self.post_json(&self.endpoints.register(), request).await
    }

    pub async fn google_auth(&mut self, id_token: &str) -> ClientResult<Session> {
        let auth: AuthResponse = self
            .post_json(
                &self.endpoints.google_auth(),
                &GoogleAuthRequest {
                    id_token: id_token.to_string(),
                },
            )
            .await?;

        self.token = Some(auth.access_token.clone());
        Ok(Session::from_auth(auth))
    }

    pub async fn email_exists(&self, email: &str) -> ClientResult<bool> {
        let url = self.endpoints.email_exists(email)?;
        let response: EmailExistsResponse = self.get(&url).await?;
        Ok(response.exists)
    }

    pub fn logout(&mut self) {
        self.token = None;
    }

    // ===== Current user =====

    pub async fn me(&self) -> ClientResult<User> {
        self.get(&self.endpoints.me()).await
    }

    pub async fn update_me(&self, update: &UpdateUserRequest) -> ClientResult<User> {
        self.patch_json(&self.endpoints.me(), update).await
    }

    pub async fn reset_password(&self, old_password: &str, new_password: &str) -> ClientResult<()> {
        let url = self.endpoints.reset_password();
        let builder = self.request(Method::PATCH, &url).json(&ResetPasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        });
        self.execute(builder, &url).await?;
        Ok(())
    }

    pub async fn profile_image(&self) -> ClientResult<Option<String>> {
        let response: ImageResponse = self.get(&self.endpoints.profile_image()).await?;
        Ok(response.image)
    }

    /// Replace the profile image with a data URL or remote image URL
    pub async fn update_profile_image(&self, image: &str) -> ClientResult<User> {
        self.patch_json(
            &self.endpoints.profile_image(),
            &UpdateImageRequest {
                image: image.to_string(),
            },
        )
        .await
    }

    // ===== Offers =====

    pub async fn create_offer(&self, offer: &CreateOffreRequest) -> ClientResult<Offre> {
        self.post_json(&self.endpoints.offers(), offer).await
    }

    pub async fn offers(&self) -> ClientResult<Vec<Offre>> {
        self.get(&self.endpoints.offers()).await
    }

    pub async fn search_offers(&self, query: &str) -> ClientResult<Vec<Offre>> {
        self.get(&self.endpoints.search_offers(query)).await
    }

    pub async fn offers_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> ClientResult<Vec<Offre>> {
        self.get(&self.endpoints.offers_by_tags(tags)).await
    }

    pub async fn offers_by_location(&self, city: &str) -> ClientResult<Vec<Offre>> {
        self.get(&self.endpoints.offers_by_location(city)?).await
    }

    pub async fn my_offers(&self) -> ClientResult<Vec<Offre>> {
        self.get(&self.endpoints.my_offers()).await
    }

    pub async fn liked_offers(&self) -> ClientResult<Vec<Offre>> {
        self.get(&self.endpoints.liked_offers()).await
    }

    pub async fn popular_offers(&self) -> ClientResult<Vec<Offre>> {
        self.get(&self.endpoints.popular_offers()).await
    }

    pub async fn offer(&self, id: &str) -> ClientResult<Offre> {
        self.get(&self.endpoints.offer(id)?).await
    }

    pub async fn update_offer(&self, id: &str, update: &UpdateOffreRequest) -> ClientResult<Offre> {
        self.patch_json(&self.endpoints.offer(id)?, update).await
    }

    pub async fn delete_offer(&self, id: &str) -> ClientResult<()> {
        self.delete(&self.endpoints.offer(id)?).await
    }

    pub async fn like_offer(&self, id: &str) -> ClientResult<LikeResponse> {
        self.post_empty(&self.endpoints.like_offer(id)?).await
    }

    // ===== Events =====

    pub async fn create_event(&self, event: &EvenementRequest) -> ClientResult<Evenement> {
        self.post_json(&self.endpoints.events(), event).await
    }

    pub async fn events(&self) -> ClientResult<Vec<Evenement>> {
        self.get(&self.endpoints.events()).await
    }

    pub async fn event(&self, id: &str) -> ClientResult<Evenement> {
        self.get(&self.endpoints.event(id)?).await
    }

    pub async fn events_by_date_range(&self, start: &str, end: &str) -> ClientResult<Vec<Evenement>> {
        self.get(&self.endpoints.events_by_date_range(start, end))
            .await
    }

    pub async fn events_by_type(&self, kind: &str) -> ClientResult<Vec<Evenement>> {
        self.get(&self.endpoints.events_by_type(kind)?).await
    }

    pub async fn update_event(&self, id: &str, event: &EvenementRequest) -> ClientResult<Evenement> {
        self.patch_json(&self.endpoints.event(id)?, event).await
    }

    pub async fn delete_event(&self, id: &str) -> ClientResult<()> {
        self.delete(&self.endpoints.event(id)?).await
    }

    // ===== Availabilities =====

    pub async fn create_availability(
        &self,
        availability: &DisponibiliteRequest,
    ) -> ClientResult<Disponibilite> {
        self.post_json(&self.endpoints.availabilities(), availability)
            .await
    }

    pub async fn availabilities(&self) -> ClientResult<Vec<Disponibilite>> {
        self.get(&self.endpoints.availabilities()).await
    }

    pub async fn availability(&self, id: &str) -> ClientResult<Disponibilite> {
        self.get(&self.endpoints.availability(id)?).await
    }

    pub async fn availabilities_by_day(&self, day: &str) -> ClientResult<Vec<Disponibilite>> {
        self.get(&self.endpoints.availabilities_by_day(day)?).await
    }

    pub async fn update_availability(
        &self,
        id: &str,
        availability: &DisponibiliteRequest,
    ) -> ClientResult<Disponibilite> {
        self.patch_json(&self.endpoints.availability(id)?, availability)
            .await
    }

    pub async fn delete_availability(&self, id: &str) -> ClientResult<()> {
        self.delete(&self.endpoints.availability(id)?).await
    }

    pub async fn clear_availabilities(&self) -> ClientResult<()> {
        self.delete(&self.endpoints.availabilities()).await
    }

    // ===== Student preferences =====

    pub async fn save_student_preferences(
        &self,
        preferences: &StudentPreferences,
    ) -> ClientResult<StudentPreferences> {
        self.post_json(&self.endpoints.student_preferences(), preferences)
            .await
    }

    pub async fn my_student_preferences(&self) -> ClientResult<StudentPreferences> {
        self.get(&self.endpoints.my_student_preferences()).await
    }

    /// Submit one questionnaire step; the server advances `current_step`
    pub async fn save_preference_step(
        &self,
        step: u8,
        data: serde_json::Value,
    ) -> ClientResult<StudentPreferences> {
        self.patch_json(
            &self.endpoints.student_preferences_step(step),
            &PreferenceStepRequest { step, data },
        )
        .await
    }

    pub async fn preferences_progress(&self) -> ClientResult<PreferencesProgress> {
        self.get(&self.endpoints.student_preferences_progress())
            .await
    }

    pub async fn student_preference(&self, id: &str) -> ClientResult<StudentPreferences> {
        self.get(&self.endpoints.student_preference(id)?).await
    }

    pub async fn delete_my_student_preferences(&self) -> ClientResult<()> {
        self.delete(&self.endpoints.my_student_preferences()).await
    }

    // ===== Reclamations =====

    pub async fn create_reclamation(
        &self,
        reclamation: &CreateReclamationRequest,
    ) -> ClientResult<Reclamation> {
        self.post_json(&self.endpoints.reclamations(), reclamation)
            .await
    }

    pub async fn reclamations(&self) -> ClientResult<Vec<Reclamation>> {
        self.get(&self.endpoints.reclamations()).await
    }

    pub async fn my_reclamations(&self) -> ClientResult<Vec<Reclamation>> {
        self.get(&self.endpoints.my_reclamations()).await
    }

    pub async fn reclamation(&self, id: &str) -> ClientResult<Reclamation> {
        self.get(&self.endpoints.reclamation(id)?).await
    }

    pub async fn update_reclamation(
        &self,
        id: &str,
        update: &UpdateReclamationRequest,
    ) -> ClientResult<Reclamation> {
        self.patch_json(&self.endpoints.reclamation(id)?, update)
            .await
    }

    pub async fn delete_reclamation(&self, id: &str) -> ClientResult<()> {
        self.delete(&self.endpoints.reclamation(id)?).await
    }

    pub async fn reclamation_stats(&self, kind: StatsKind) -> ClientResult<Vec<StatBucket>> {
        self.get(&self.endpoints.reclamation_stats(kind)).await
    }

    // ===== Chat =====

    /// Open (or fetch the existing) conversation about an offer
    pub async fn create_chat(&self, offer_id: &str) -> ClientResult<Chat> {
        self.post_json(
            &self.endpoints.chats(),
            &CreateChatRequest {
                offer_id: offer_id.to_string(),
            },
        )
        .await
    }

    pub async fn chat(&self, chat_id: &str) -> ClientResult<Chat> {
        self.get(&self.endpoints.chat(chat_id)?).await
    }

    pub async fn send_message(
        &self,
        chat_id: &str,
        message: &SendMessageRequest,
    ) -> ClientResult<ChatMessage> {
        self.post_json(&self.endpoints.send_message(chat_id)?, message)
            .await
    }

    pub async fn my_chats(&self) -> ClientResult<Vec<Chat>> {
        self.get(&self.endpoints.my_chats()).await
    }

    pub async fn chat_messages(
        &self,
        chat_id: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> ClientResult<MessagePage> {
        self.get(&self.endpoints.chat_messages(chat_id, page, limit)?)
            .await
    }

    pub async fn block_chat(&self, chat_id: &str) -> ClientResult<Chat> {
        self.post_empty(&self.endpoints.block_chat(chat_id)?).await
    }

    pub async fn unblock_chat(&self, chat_id: &str) -> ClientResult<Chat> {
        self.post_empty(&self.endpoints.unblock_chat(chat_id)?).await
    }

    pub async fn accept_chat(&self, chat_id: &str) -> ClientResult<Chat> {
        self.post_empty(&self.endpoints.accept_chat(chat_id)?).await
    }

    pub async fn mark_chat_read(&self, chat_id: &str) -> ClientResult<()> {
        let url = self.endpoints.mark_chat_read(chat_id)?;
        self.execute(self.request(Method::POST, &url), &url).await?;
        Ok(())
    }

    pub async fn can_call(&self, offer_id: &str) -> ClientResult<CanCallResponse> {
        self.get(&self.endpoints.can_call(offer_id)?).await
    }

    /// Upload an attachment; the returned URL goes into a media message
    pub async fn upload_chat_file(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> ClientResult<UploadResponse> {
        let content_type = content_type_for(file_name)?;
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| ClientError::Validation(format!("Failed to create multipart: {}", e)))?;
        let form = Form::new().part("file", part);

        info!("Uploading chat attachment {}", file_name);
        self.post_multipart(&self.endpoints.chat_upload(), form)
            .await
    }

    // ===== Schedule import =====

    pub async fn process_schedule(&self, text: &str) -> ClientResult<ScheduleProcessResponse> {
        self.post_json(
            &self.endpoints.schedule_process(),
            &ScheduleProcessRequest {
                text: text.to_string(),
            },
        )
        .await
    }

    pub async fn create_schedule_events(
        &self,
        request: &CreateEventsRequest,
    ) -> ClientResult<CreateEventsResponse> {
        self.post_json(&self.endpoints.schedule_create_events(), request)
            .await
    }

    // ===== Backend AI =====

    pub async fn analyze_routine(
        &self,
        request: &RoutineAnalysisRequest,
        enhanced: bool,
    ) -> ClientResult<RoutineAnalysisResponse> {
        let url = if enhanced {
            self.endpoints.routine_analyze_enhanced()
        } else {
            self.endpoints.routine_analyze()
        };
        info!("Requesting routine analysis (enhanced: {})", enhanced);
        self.post_json(&url, request).await
    }

    pub async fn ai_matching(&self, request: &AiMatchingRequest) -> ClientResult<AiMatchingResponse> {
        self.post_json(&self.endpoints.ai_matching_analyze(), request)
            .await
    }
}

/// Content type for an uploaded attachment, by extension
pub fn content_type_for(file_name: &str) -> ClientResult<&'static str> {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => Ok("image/jpeg"),
        Some("png") => Ok("image/png"),
        Some("gif") => Ok("image/gif"),
        Some("m4a") => Ok("audio/mp4"),
        Some("mp3") => Ok("audio/mpeg"),
        Some("wav") => Ok("audio/wav"),
        Some("pdf") => Ok("application/pdf"),
        Some("docx") => {
            Ok("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        _ => Err(ClientError::Validation(format!(
            "Unsupported file format: {}",
            file_name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_unconfigured_base() {
        let config = ApiConfig::development().with_base_url("");
        assert!(matches!(ApiClient::new(config), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_token_handling() {
        let mut client = ApiClient::new(ApiConfig::development())
            .unwrap()
            .with_token("abc");
        assert_eq!(client.token(), Some("abc"));
        client.logout();
        assert_eq!(client.token(), None);
        client.set_token(Some("def".into()));
        assert_eq!(client.token(), Some("def"));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("photo.JPG").unwrap(), "image/jpeg");
        assert_eq!(content_type_for("note.m4a").unwrap(), "audio/mp4");
        assert_eq!(content_type_for("cv.pdf").unwrap(), "application/pdf");
        assert!(content_type_for("archive.zip").is_err());
        assert!(content_type_for("noext").is_err());
    }

    #[test]
    fn test_endpoints_follow_config() {
        let client =
            ApiClient::new(ApiConfig::production().with_api_prefix(true)).unwrap();
        assert!(client.endpoints().me().ends_with("/api/user/me"));
    }
}
