// src/endpoints.rs
//! Endpoint resolution - pure URL construction over an [`ApiConfig`].
//!
//! Every logical operation is an [`Endpoint`] variant carrying its
//! identifiers. Resolution encodes each identifier for its destination
//! (path segment or query value), interpolates it into the route template,
//! and prepends the backend root (base URL plus optional `/api`) or the AI
//! service host. No I/O happens here.

use std::fmt;

use crate::config::ApiConfig;
use crate::encoding::{encode_path_segment, encode_query_value};
use crate::error::{ClientError, ClientResult};
use crate::types::reclamation::StatsKind;

/// Which server a route lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    Backend,
    AiService,
}

/// Static description of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub methods: &'static str,
    pub host: Host,
    pub template: &'static str,
}

const fn route(name: &'static str, methods: &'static str, template: &'static str) -> Route {
    Route {
        name,
        methods,
        host: Host::Backend,
        template,
    }
}

const fn ai_route(name: &'static str, methods: &'static str, template: &'static str) -> Route {
    Route {
        name,
        methods,
        host: Host::AiService,
        template,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    // auth
    Login,
    Register,
    GoogleAuth,
    EmailExists { email: String },
    // user
    Me,
    ResetPassword,
    ProfileImage,
    // offers
    Offers,
    SearchOffers { query: String },
    OffersByTags { tags: Vec<String> },
    OffersByLocation { city: String },
    MyOffers,
    LikedOffers,
    PopularOffers,
    Offer { id: String },
    LikeOffer { id: String },
    // events
    Events,
    Event { id: String },
    EventsByDateRange { start: String, end: String },
    EventsByType { kind: String },
    // availabilities
    Availabilities,
    Availability { id: String },
    AvailabilitiesByDay { day: String },
    // student preferences
    StudentPreferences,
    MyStudentPreferences,
    StudentPreferencesStep { step: u8 },
    StudentPreferencesProgress,
    StudentPreference { id: String },
    // reclamations
    Reclamations,
    MyReclamations,
    Reclamation { id: String },
    ReclamationStats { kind: StatsKind },
    // chat
    Chats,
    Chat { chat_id: String },
    SendMessage { chat_id: String },
    MyChats,
    ChatMessages {
        chat_id: String,
        page: Option<u32>,
        limit: Option<u32>,
    },
    BlockChat { chat_id: String },
    UnblockChat { chat_id: String },
    AcceptChat { chat_id: String },
    ChatUpload,
    MarkChatRead { chat_id: String },
    CanCall { offer_id: String },
    // schedule import
    ScheduleProcess,
    ScheduleCreateEvents,
    // backend AI
    RoutineAnalyze,
    RoutineAnalyzeEnhanced,
    AiMatchingAnalyze,
    // external AI service
    AnalyzeInterview,
    InterviewTextChat,
    InterviewVoiceChat,
    SendInterviewInvitation,
    AcceptInterviewInvitation,
    RejectInterviewInvitation,
    PendingInvitations { user_id: String },
}

/// Operation names accepted by [`Endpoint::from_name`], in catalog order
pub const ENDPOINT_NAMES: &[&str] = &[
    "login",
    "register",
    "google-auth",
    "email-exists",
    "me",
    "reset-password",
    "profile-image",
    "offers",
    "search-offers",
    "offers-by-tags",
    "offers-by-location",
    "my-offers",
    "liked-offers",
    "popular-offers",
    "offer",
    "like-offer",
    "events",
    "event",
    "events-by-date-range",
    "events-by-type",
    "availabilities",
    "availability",
    "availabilities-by-day",
    "student-preferences",
    "my-student-preferences",
    "student-preferences-step",
    "student-preferences-progress",
    "student-preference",
    "reclamations",
    "my-reclamations",
    "reclamation",
    "reclamation-stats",
    "chats",
    "chat",
    "send-message",
    "my-chats",
    "chat-messages",
    "block-chat",
    "unblock-chat",
    "accept-chat",
    "chat-upload",
    "mark-chat-read",
    "can-call",
    "schedule-process",
    "schedule-create-events",
    "routine-analyze",
    "routine-analyze-enhanced",
    "ai-matching-analyze",
    "analyze-interview",
    "interview-text-chat",
    "interview-voice-chat",
    "send-interview-invitation",
    "accept-interview-invitation",
    "reject-interview-invitation",
    "pending-invitations",
];

impl Endpoint {
    pub fn route(&self) -> Route {
        use Endpoint::*;
        match self {
            Login => route("login", "POST", "/auth/login"),
            Register => route("register", "POST", "/admin/register"),
            GoogleAuth => route("google-auth", "POST", "/auth/google"),
            EmailExists { .. } => route("email-exists", "GET", "/admin/email-exists/{email}"),
            Me => route("me", "GET|PATCH", "/user/me"),
            ResetPassword => route("reset-password", "PATCH", "/user/me/reset-password"),
            ProfileImage => route("profile-image", "GET|PATCH", "/user/me/image"),
            Offers => route("offers", "GET|POST", "/offre"),
            SearchOffers { .. } => route("search-offers", "GET", "/offre/search"),
            OffersByTags { .. } => route("offers-by-tags", "GET", "/offre/tags"),
            OffersByLocation { .. } => {
                route("offers-by-location", "GET", "/offre/location/{city}")
            }
            MyOffers => route("my-offers", "GET", "/offre/my-offers"),
            LikedOffers => route("liked-offers", "GET", "/offre/liked"),
            PopularOffers => route("popular-offers", "GET", "/offre/popular"),
            Offer { .. } => route("offer", "GET|PATCH|DELETE", "/offre/{id}"),
            LikeOffer { .. } => route("like-offer", "POST", "/offre/{id}/like"),
            Events => route("events", "GET|POST", "/evenements"),
            Event { .. } => route("event", "GET|PATCH|DELETE", "/evenements/{id}"),
            EventsByDateRange { .. } => {
                route("events-by-date-range", "GET", "/evenements/date-range")
            }
            EventsByType { .. } => route("events-by-type", "GET", "/evenements/type/{type}"),
            Availabilities => route("availabilities", "GET|POST|DELETE", "/disponibilites"),
            Availability { .. } => {
                route("availability", "GET|PATCH|DELETE", "/disponibilites/{id}")
            }
            AvailabilitiesByDay { .. } => {
                route("availabilities-by-day", "GET", "/disponibilites/jour/{day}")
            }
            StudentPreferences => route("student-preferences", "POST", "/student-preferences"),
            MyStudentPreferences => route(
                "my-student-preferences",
                "GET|DELETE",
                "/student-preferences/my-preferences",
            ),
            StudentPreferencesStep { .. } => route(
                "student-preferences-step",
                "PATCH",
                "/student-preferences/step/{step}",
            ),
            StudentPreferencesProgress => route(
                "student-preferences-progress",
                "GET",
                "/student-preferences/progress",
            ),
            StudentPreference { .. } => route(
                "student-preference",
                "GET|PATCH|DELETE",
                "/student-preferences/{id}",
            ),
            Reclamations => route("reclamations", "GET|POST", "/reclamations"),
            MyReclamations => route("my-reclamations", "GET", "/reclamations/my-reclamations"),
            Reclamation { .. } => route("reclamation", "GET|PATCH|DELETE", "/reclamations/{id}"),
            ReclamationStats { .. } => {
                route("reclamation-stats", "GET", "/reclamations/stats/{kind}")
            }
            Chats => route("chats", "POST", "/chat"),
            Chat { .. } => route("chat", "GET", "/chat/{id}"),
            SendMessage { .. } => route("send-message", "POST", "/chat/{id}/message"),
            MyChats => route("my-chats", "GET", "/chat/my-chats"),
            ChatMessages { .. } => route("chat-messages", "GET", "/chat/{id}/messages"),
            BlockChat { .. } => route("block-chat", "POST", "/chat/{id}/block"),
            UnblockChat { .. } => route("unblock-chat", "POST", "/chat/{id}/unblock"),
            AcceptChat { .. } => route("accept-chat", "POST", "/chat/{id}/accept"),
            ChatUpload => route("chat-upload", "POST", "/chat/upload"),
            MarkChatRead { .. } => route("mark-chat-read", "POST", "/chat/{id}/mark-read"),
            CanCall { .. } => route("can-call", "GET", "/chat/can-call/{offerId}"),
            ScheduleProcess => route("schedule-process", "POST", "/schedule/process"),
            ScheduleCreateEvents => {
                route("schedule-create-events", "POST", "/schedule/create-events")
            }
            RoutineAnalyze => route("routine-analyze", "POST", "/ai/routine/analyze"),
            RoutineAnalyzeEnhanced => route(
                "routine-analyze-enhanced",
                "POST",
                "/ai/routine/analyze-enhanced",
            ),
            AiMatchingAnalyze => route("ai-matching-analyze", "POST", "/ai-matching/analyze"),
            AnalyzeInterview => ai_route("analyze-interview", "POST", "/api/analyze-interview"),
            InterviewTextChat => ai_route("interview-text-chat", "POST", "/api/chat"),
            InterviewVoiceChat => ai_route("interview-voice-chat", "POST", "/api/voice-chat"),
            SendInterviewInvitation => ai_route(
                "send-interview-invitation",
                "POST",
                "/api/send-interview-invitation",
            ),
            AcceptInterviewInvitation => ai_route(
                "accept-interview-invitation",
                "POST",
                "/api/accept-interview-invitation",
            ),
            RejectInterviewInvitation => ai_route(
                "reject-interview-invitation",
                "POST",
                "/api/reject-interview-invitation",
            ),
            PendingInvitations { .. } => ai_route(
                "pending-invitations",
                "GET",
                "/api/get-pending-invitations/{userId}",
            ),
        }
    }

    pub fn name(&self) -> &'static str {
        self.route().name
    }

    /// Identifiers substituted into the template placeholders, in order
    fn path_args(&self) -> Vec<&str> {
        use Endpoint::*;
        match self {
            EmailExists { email } => vec![email.as_str()],
            OffersByLocation { city } => vec![city.as_str()],
            Offer { id }
            | LikeOffer { id }
            | Event { id }
            | Availability { id }
            | StudentPreference { id }
            | Reclamation { id } => vec![id.as_str()],
            EventsByType { kind } => vec![kind.as_str()],
            AvailabilitiesByDay { day } => vec![day.as_str()],
            ReclamationStats { kind } => vec![kind.as_str()],
            Chat { chat_id }
            | SendMessage { chat_id }
            | ChatMessages { chat_id, .. }
            | BlockChat { chat_id }
            | UnblockChat { chat_id }
            | AcceptChat { chat_id }
            | MarkChatRead { chat_id } => vec![chat_id.as_str()],
            CanCall { offer_id } => vec![offer_id.as_str()],
            PendingInvitations { user_id } => vec![user_id.as_str()],
            _ => Vec::new(),
        }
    }

    fn query(&self) -> QueryString {
        use Endpoint::*;
        match self {
            SearchOffers { query } => QueryString::new().param("q", query),
            OffersByTags { tags } => QueryString::new().param("tags", tags.join(",")),
            EventsByDateRange { start, end } => QueryString::new()
                .param("startDate", start)
                .param("endDate", end),
            ChatMessages { page, limit, .. } => QueryString::new()
                .opt_param("page", *page)
                .opt_param("limit", *limit),
            _ => QueryString::new(),
        }
    }

    /// Reject identifiers that URL parsing would collapse into another
    /// resource: `""` drops the segment, `.` and `..` are dot segments
    /// (also in their percent-encoded form).
    pub fn validate(&self) -> ClientResult<()> {
        match self
            .path_args()
            .into_iter()
            .find(|arg| matches!(*arg, "" | "." | ".."))
        {
            Some(arg) => Err(ClientError::Validation(format!(
                "{}: {:?} is not a usable path identifier",
                self.name(),
                arg
            ))),
            None => Ok(()),
        }
    }

    /// Resource path relative to the host root, identifiers encoded
    pub fn path(&self) -> String {
        let route = self.route();
        let path = match self {
            Endpoint::StudentPreferencesStep { step } => {
                let step = step.to_string();
                fill_template(route.template, &[step.as_str()])
            }
            _ => fill_template(route.template, &self.path_args()),
        };
        self.query().append_to(path)
    }

    /// Build an endpoint from its operation name and positional arguments
    pub fn from_name(name: &str, args: &[String]) -> ClientResult<Self> {
        let mut args = args.iter();
        let mut next = |what: &str| -> ClientResult<String> {
            args.next().cloned().ok_or_else(|| {
                ClientError::Validation(format!("{} requires argument <{}>", name, what))
            })
        };

        use Endpoint::*;
        let endpoint = match name {
            "login" => Login,
            "register" => Register,
            "google-auth" => GoogleAuth,
            "email-exists" => EmailExists {
                email: next("email")?,
            },
            "me" => Me,
            "reset-password" => ResetPassword,
            "profile-image" => ProfileImage,
            "offers" => Offers,
            "search-offers" => SearchOffers {
                query: next("query")?,
            },
            "offers-by-tags" => OffersByTags {
                tags: next("tags")?
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect(),
            },
            "offers-by-location" => OffersByLocation { city: next("city")? },
            "my-offers" => MyOffers,
            "liked-offers" => LikedOffers,
            "popular-offers" => PopularOffers,
            "offer" => Offer { id: next("id")? },
            "like-offer" => LikeOffer { id: next("id")? },
            "events" => Events,
            "event" => Event { id: next("id")? },
            "events-by-date-range" => EventsByDateRange {
                start: next("start")?,
                end: next("end")?,
            },
            "events-by-type" => EventsByType { kind: next("type")? },
            "availabilities" => Availabilities,
            "availability" => Availability { id: next("id")? },
            "availabilities-by-day" => AvailabilitiesByDay { day: next("day")? },
            "student-preferences" => StudentPreferences,
            "my-student-preferences" => MyStudentPreferences,
            "student-preferences-step" => {
                let raw = next("step")?;
                let step = raw.parse().map_err(|_| {
                    ClientError::Validation(format!("step must be a number, got: {}", raw))
                })?;
                StudentPreferencesStep { step }
            }
            "student-preferences-progress" => StudentPreferencesProgress,
            "student-preference" => StudentPreference { id: next("id")? },
            "reclamations" => Reclamations,
            "my-reclamations" => MyReclamations,
            "reclamation" => Reclamation { id: next("id")? },
            "reclamation-stats" => {
                let raw = next("types|status")?;
                let kind = match raw.as_str() {
                    "types" => StatsKind::Types,
                    "status" => StatsKind::Status,
                    other => {
                        return Err(ClientError::Validation(format!(
                            "stats kind must be types or status, got: {}",
                            other
                        )))
                    }
                };
                ReclamationStats { kind }
            }
            "chats" => Chats,
            "chat" => Chat {
                chat_id: next("chat-id")?,
            },
            "send-message" => SendMessage {
                chat_id: next("chat-id")?,
            },
            "my-chats" => MyChats,
            "chat-messages" => {
                let chat_id = next("chat-id")?;
                let page = parse_optional_number(next("page").ok(), "page")?;
                let limit = parse_optional_number(next("limit").ok(), "limit")?;
                ChatMessages {
                    chat_id,
                    page,
                    limit,
                }
            }
            "block-chat" => BlockChat {
                chat_id: next("chat-id")?,
            },
            "unblock-chat" => UnblockChat {
                chat_id: next("chat-id")?,
            },
            "accept-chat" => AcceptChat {
                chat_id: next("chat-id")?,
            },
            "chat-upload" => ChatUpload,
            "mark-chat-read" => MarkChatRead {
                chat_id: next("chat-id")?,
            },
            "can-call" => CanCall {
                offer_id: next("offer-id")?,
            },
            "schedule-process" => ScheduleProcess,
            "schedule-create-events" => ScheduleCreateEvents,
            "routine-analyze" => RoutineAnalyze,
            "routine-analyze-enhanced" => RoutineAnalyzeEnhanced,
            "ai-matching-analyze" => AiMatchingAnalyze,
            "analyze-interview" => AnalyzeInterview,
            "interview-text-chat" => InterviewTextChat,
            "interview-voice-chat" => InterviewVoiceChat,
            "send-interview-invitation" => SendInterviewInvitation,
            "accept-interview-invitation" => AcceptInterviewInvitation,
            "reject-interview-invitation" => RejectInterviewInvitation,
            "pending-invitations" => PendingInvitations {
                user_id: next("user-id")?,
            },
            other => {
                return Err(ClientError::Validation(format!(
                    "unknown operation: {}",
                    other
                )))
            }
        };
        Ok(endpoint)
    }

    /// One instance of every operation, built with placeholder arguments
    pub fn catalog() -> Vec<Endpoint> {
        let sample = ["1".to_string(), "2".to_string()];
        let stats = ["types".to_string()];
        ENDPOINT_NAMES
            .iter()
            .filter_map(|name| {
                let args: &[String] = if *name == "reclamation-stats" { &stats } else { &sample };
                Endpoint::from_name(name, args).ok()
            })
            .collect()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route = self.route();
        write!(f, "{} {}", route.methods, self.path())
    }
}

fn parse_optional_number(raw: Option<String>, what: &str) -> ClientResult<Option<u32>> {
    match raw {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            ClientError::Validation(format!("{} must be a number, got: {}", what, value))
        }),
    }
}

/// Replace each `{placeholder}` in `template` with the next argument,
/// percent-encoded as a path segment
fn fill_template(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut args = args.iter();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        match args.next() {
            Some(arg) => out.push_str(&encode_path_segment(arg)),
            None => out.push_str(&rest[open..open + close + 1]),
        }
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    out
}

/// Query-string builder that omits absent parameters and never leaves a
/// dangling `?`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(&'static str, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    pub fn opt_param<T: fmt::Display>(self, key: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn append_to(self, mut path: String) -> String {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            path.push(if i == 0 { '?' } else { '&' });
            path.push_str(key);
            path.push('=');
            path.push_str(&encode_query_value(value));
        }
        path
    }
}

/// Resolves endpoints to fully-qualified URLs for one configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_root: String,
    ai_root: String,
    base_url: String,
    socket_url: String,
}

impl Endpoints {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            api_root: config.api_root(),
            ai_root: config.ai_base_url().to_string(),
            base_url: config.base_url().to_string(),
            socket_url: config.socket_url().to_string(),
        }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Fully-qualified URL of an endpoint, after checking its identifiers
    pub fn resolve(&self, endpoint: &Endpoint) -> ClientResult<String> {
        endpoint.validate()?;
        Ok(self.url(endpoint))
    }

    fn url(&self, endpoint: &Endpoint) -> String {
        let root = match endpoint.route().host {
            Host::Backend => &self.api_root,
            Host::AiService => &self.ai_root,
        };
        format!("{}{}", root, endpoint.path())
    }

    /// Socket.IO invitation channel URL
    pub fn socket(&self) -> &str {
        &self.socket_url
    }

    /// Call-signaling WebSocket URL on the backend host
    pub fn call_signaling(&self) -> String {
        let ws_base = if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            self.base_url.clone()
        };
        format!("{}/call-signaling", ws_base)
    }

    // ===== Auth =====

    pub fn login(&self) -> String {
        self.url(&Endpoint::Login)
    }

    pub fn register(&self) -> String {
        self.url(&Endpoint::Register)
    }

    pub fn google_auth(&self) -> String {
        self.url(&Endpoint::GoogleAuth)
    }

    pub fn email_exists(&self, email: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::EmailExists {
            email: email.to_string(),
        })
    }

    // ===== User =====

    pub fn me(&self) -> String {
        self.url(&Endpoint::Me)
    }

    pub fn reset_password(&self) -> String {
        self.url(&Endpoint::ResetPassword)
    }

    pub fn profile_image(&self) -> String {
        self.url(&Endpoint::ProfileImage)
    }

    // ===== Offers =====

    pub fn offers(&self) -> String {
        self.url(&Endpoint::Offers)
    }

    pub fn search_offers(&self, query: &str) -> String {
        self.url(&Endpoint::SearchOffers {
            query: query.to_string(),
        })
    }

    pub fn offers_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> String {
        self.url(&Endpoint::OffersByTags {
            tags: tags.iter().map(|t| t.as_ref().to_string()).collect(),
        })
    }

    pub fn offers_by_location(&self, city: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::OffersByLocation {
            city: city.to_string(),
        })
    }

    pub fn my_offers(&self) -> String {
        self.url(&Endpoint::MyOffers)
    }

    pub fn liked_offers(&self) -> String {
        self.url(&Endpoint::LikedOffers)
    }

    pub fn popular_offers(&self) -> String {
        self.url(&Endpoint::PopularOffers)
    }

    pub fn offer(&self, id: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::Offer { id: id.to_string() })
    }

    pub fn like_offer(&self, id: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::LikeOffer { id: id.to_string() })
    }

    // ===== Events & availabilities =====

    pub fn events(&self) -> String {
        self.url(&Endpoint::Events)
    }

    pub fn event(&self, id: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::Event { id: id.to_string() })
    }

    pub fn events_by_date_range(&self, start: &str, end: &str) -> String {
        self.url(&Endpoint::EventsByDateRange {
            start: start.to_string(),
            end: end.to_string(),
        })
    }

    pub fn events_by_type(&self, kind: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::EventsByType {
            kind: kind.to_string(),
        })
    }

    pub fn availabilities(&self) -> String {
        self.url(&Endpoint::Availabilities)
    }

    pub fn availability(&self, id: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::Availability { id: id.to_string() })
    }

    pub fn availabilities_by_day(&self, day: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::AvailabilitiesByDay {
            day: day.to_string(),
        })
    }

    // ===== Student preferences =====

    pub fn student_preferences(&self) -> String {
        self.url(&Endpoint::StudentPreferences)
    }

    pub fn my_student_preferences(&self) -> String {
        self.url(&Endpoint::MyStudentPreferences)
    }

    pub fn student_preferences_step(&self, step: u8) -> String {
        self.url(&Endpoint::StudentPreferencesStep { step })
    }

    pub fn student_preferences_progress(&self) -> String {
        self.url(&Endpoint::StudentPreferencesProgress)
    }

    pub fn student_preference(&self, id: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::StudentPreference { id: id.to_string() })
    }

    // ===== Reclamations =====

    pub fn reclamations(&self) -> String {
        self.url(&Endpoint::Reclamations)
    }

    pub fn my_reclamations(&self) -> String {
        self.url(&Endpoint::MyReclamations)
    }

    pub fn reclamation(&self, id: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::Reclamation { id: id.to_string() })
    }

    pub fn reclamation_stats(&self, kind: StatsKind) -> String {
        self.url(&Endpoint::ReclamationStats { kind })
    }

    // ===== Chat =====

    pub fn chats(&self) -> String {
        self.url(&Endpoint::Chats)
    }

    pub fn chat(&self, chat_id: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::Chat {
            chat_id: chat_id.to_string(),
        })
    }

    pub fn send_message(&self, chat_id: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::SendMessage {
            chat_id: chat_id.to_string(),
        })
    }

    pub fn my_chats(&self) -> String {
        self.url(&Endpoint::MyChats)
    }

    pub fn chat_messages(
        &self,
        chat_id: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> ClientResult<String> {
        self.resolve(&Endpoint::ChatMessages {
            chat_id: chat_id.to_string(),
            page,
            limit,
        })
    }

    pub fn block_chat(&self, chat_id: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::BlockChat {
            chat_id: chat_id.to_string(),
        })
    }

    pub fn unblock_chat(&self, chat_id: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::UnblockChat {
            chat_id: chat_id.to_string(),
        })
    }

    pub fn accept_chat(&self, chat_id: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::AcceptChat {
            chat_id: chat_id.to_string(),
        })
    }

    pub fn chat_upload(&self) -> String {
        self.url(&Endpoint::ChatUpload)
    }

    pub fn mark_chat_read(&self, chat_id: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::MarkChatRead {
            chat_id: chat_id.to_string(),
        })
    }

    pub fn can_call(&self, offer_id: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::CanCall {
            offer_id: offer_id.to_string(),
        })
    }

    // ===== Schedule & AI =====

    pub fn schedule_process(&self) -> String {
        self.url(&Endpoint::ScheduleProcess)
    }

    pub fn schedule_create_events(&self) -> String {
        self.url(&Endpoint::ScheduleCreateEvents)
    }

    pub fn routine_analyze(&self) -> String {
        self.url(&Endpoint::RoutineAnalyze)
    }

    pub fn routine_analyze_enhanced(&self) -> String {
        self.url(&Endpoint::RoutineAnalyzeEnhanced)
    }

    pub fn ai_matching_analyze(&self) -> String {
        self.url(&Endpoint::AiMatchingAnalyze)
    }

    // ===== External AI service =====

    pub fn analyze_interview(&self) -> String {
        self.url(&Endpoint::AnalyzeInterview)
    }

    pub fn interview_text_chat(&self) -> String {
        self.url(&Endpoint::InterviewTextChat)
    }

    pub fn interview_voice_chat(&self) -> String {
        self.url(&Endpoint::InterviewVoiceChat)
    }

    pub fn send_interview_invitation(&self) -> String {
        self.url(&Endpoint::SendInterviewInvitation)
    }

    pub fn accept_interview_invitation(&self) -> String {
        self.url(&Endpoint::AcceptInterviewInvitation)
    }

    pub fn reject_interview_invitation(&self) -> String {
        self.url(&Endpoint::RejectInterviewInvitation)
    }

    pub fn pending_invitations(&self, user_id: &str) -> ClientResult<String> {
        self.resolve(&Endpoint::PendingInvitations {
            user_id: user_id.to_string(),
        })
    }
}
