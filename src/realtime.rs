// src/realtime.rs
//! Real-time vocabulary: invitation channel events, call-signaling
//! messages and the call state machine they drive.
//!
//! Transport (Socket.IO handshake, WebSocket I/O) belongs to the caller;
//! this module encodes/decodes frames and validates state changes.
//!
//! Call lifecycle:
//! Idle -> Connecting -> Outgoing | Incoming -> InCall -> Ended | Failed
//! Ended/Failed -> Idle

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};
use crate::types::interview::Invitation;

// ===== Invitation channel =====

/// Events exchanged on the Socket.IO invitation channel
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// Subscribe to the room of a user
    Join { user_id: String },
    InvitationReceived(Invitation),
    Ping,
    Pong,
}

/// Socket.IO EVENT packet inside an Engine.IO MESSAGE
const EVENT_PACKET_PREFIX: &str = "42";

impl ChannelEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ChannelEvent::Join { .. } => "join",
            ChannelEvent::InvitationReceived(_) => "invitation_received",
            ChannelEvent::Ping => "ping",
            ChannelEvent::Pong => "pong",
        }
    }

    /// `["event", payload]` array; payload omitted for ping/pong
    pub fn to_frame(&self) -> ClientResult<String> {
        let frame = match self {
            ChannelEvent::Join { user_id } => {
                serde_json::json!([self.name(), { "userId": user_id }])
            }
            ChannelEvent::InvitationReceived(invitation) => {
                serde_json::json!([self.name(), serde_json::to_value(invitation)?])
            }
            ChannelEvent::Ping | ChannelEvent::Pong => serde_json::json!([self.name()]),
        };
        Ok(frame.to_string())
    }

    /// Frame prefixed with the Engine.IO/Socket.IO packet type
    pub fn to_packet(&self) -> ClientResult<String> {
        Ok(format!("{}{}", EVENT_PACKET_PREFIX, self.to_frame()?))
    }

    /// Parse a frame, with or without the `42` packet prefix
    pub fn from_frame(raw: &str) -> ClientResult<Self> {
        let body = raw.trim().strip_prefix(EVENT_PACKET_PREFIX).unwrap_or(raw.trim());
        let value: Value = serde_json::from_str(body)?;
        let items = value
            .as_array()
            .ok_or_else(|| ClientError::Decode(format!("event frame is not an array: {}", body)))?;
        let name = items
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| ClientError::Decode(format!("event frame has no name: {}", body)))?;
        let payload = items.get(1).cloned().unwrap_or(Value::Null);

        match name {
            "join" => {
                let user_id = payload
                    .get("userId")
                    .or_else(|| payload.get("user_id"))
                    .and_then(Value::as_str)
                    .or_else(|| payload.as_str())
                    .ok_or_else(|| ClientError::Decode("join event without user id".to_string()))?;
                Ok(ChannelEvent::Join {
                    user_id: user_id.to_string(),
                })
            }
            "invitation_received" => Ok(ChannelEvent::InvitationReceived(
                serde_json::from_value(payload)?,
            )),
            "ping" => Ok(ChannelEvent::Ping),
            "pong" => Ok(ChannelEvent::Pong),
            other => Err(ClientError::Decode(format!("unknown channel event: {}", other))),
        }
    }

    /// Reply owed for an incoming event, if any
    pub fn reply(&self) -> Option<ChannelEvent> {
        match self {
            ChannelEvent::Ping => Some(ChannelEvent::Pong),
            _ => None,
        }
    }
}

// ===== Call signaling =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SignalMessage {
    #[serde(rename_all = "camelCase")]
    CallRequest {
        call_id: String,
        from: String,
        to: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        chat_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Offer { call_id: String, sdp: String },
    #[serde(rename_all = "camelCase")]
    Answer { call_id: String, sdp: String },
    #[serde(rename_all = "camelCase")]
    IceCandidate {
        call_id: String,
        candidate: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        sdp_mid: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        sdp_m_line_index: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    Accept { call_id: String },
    #[serde(rename_all = "camelCase")]
    Reject {
        call_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Hangup { call_id: String },
}

impl SignalMessage {
    pub fn call_id(&self) -> &str {
        match self {
            SignalMessage::CallRequest { call_id, .. }
            | SignalMessage::Offer { call_id, .. }
            | SignalMessage::Answer { call_id, .. }
            | SignalMessage::IceCandidate { call_id, .. }
            | SignalMessage::Accept { call_id }
            | SignalMessage::Reject { call_id, .. }
            | SignalMessage::Hangup { call_id } => call_id,
        }
    }

    pub fn to_json(&self) -> ClientResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> ClientResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallState {
    Idle,
    Connecting,
    Outgoing,
    Incoming,
    InCall,
    Ended,
    Failed,
}

impl CallState {
    pub fn as_str(self) -> &'static str {
        match self {
            CallState::Idle => "idle",
            CallState::Connecting => "connecting",
            CallState::Outgoing => "outgoing",
            CallState::Incoming => "incoming",
            CallState::InCall => "in_call",
            CallState::Ended => "ended",
            CallState::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, CallState::Ended | CallState::Failed)
    }

    /// States in which media negotiation messages are meaningful
    pub fn is_active(self) -> bool {
        matches!(
            self,
            CallState::Outgoing | CallState::Incoming | CallState::InCall
        )
    }
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate that a call state transition is allowed.
pub fn validate_transition(from: CallState, to: CallState) -> ClientResult<()> {
    use CallState::*;
    let valid = matches!(
        (from, to),
        (Idle, Connecting)
            | (Connecting, Outgoing)
            | (Connecting, Incoming)
            | (Connecting, Ended)
            | (Connecting, Failed)
            | (Outgoing, InCall)
            | (Outgoing, Ended)
            | (Outgoing, Failed)
            | (Incoming, InCall)
            | (Incoming, Ended)
            | (Incoming, Failed)
            | (InCall, Ended)
            | (InCall, Failed)
            | (Ended, Idle)
            | (Failed, Idle)
    );

    if valid {
        Ok(())
    } else {
        Err(ClientError::InvalidTransition(from, to))
    }
}

/// One call as seen from this side of the signaling socket
#[derive(Debug, Clone)]
pub struct CallSession {
    user_id: String,
    state: CallState,
    call_id: Option<String>,
    peer: Option<String>,
    failure: Option<String>,
}

impl CallSession {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            state: CallState::Idle,
            call_id: None,
            peer: None,
            failure: None,
        }
    }

    pub fn state(&self) -> CallState {
        self.state
    }

    pub fn call_id(&self) -> Option<&str> {
        self.call_id.as_deref()
    }

    pub fn peer(&self) -> Option<&str> {
        self.peer.as_deref()
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    fn transition(&mut self, to: CallState) -> ClientResult<()> {
        validate_transition(self.state, to)?;
        debug!("Call state {} -> {}", self.state, to);
        self.state = to;
        Ok(())
    }

    /// Signaling socket is being opened
    pub fn connect(&mut self) -> ClientResult<()> {
        self.transition(CallState::Connecting)
    }

    /// Place a call; returns the request to send to the peer
    pub fn dial(&mut self, peer: &str, chat_id: Option<&str>) -> ClientResult<SignalMessage> {
        self.transition(CallState::Outgoing)?;
        let call_id = Uuid::new_v4().to_string();
        self.call_id = Some(call_id.clone());
        self.peer = Some(peer.to_string());
        info!("Calling {} (call {})", peer, call_id);

        Ok(SignalMessage::CallRequest {
            call_id,
            from: self.user_id.clone(),
            to: peer.to_string(),
            chat_id: chat_id.map(String::from),
        })
    }

    /// Answer the ringing call
    pub fn accept(&mut self) -> ClientResult<SignalMessage> {
        let call_id = self.require_call_id()?;
        if self.state != CallState::Incoming {
            return Err(ClientError::InvalidTransition(self.state, CallState::InCall));
        }
        self.transition(CallState::InCall)?;
        Ok(SignalMessage::Accept { call_id })
    }

    /// Decline the ringing call
    pub fn reject(&mut self, reason: Option<&str>) -> ClientResult<SignalMessage> {
        let call_id = self.require_call_id()?;
        if self.state != CallState::Incoming {
            return Err(ClientError::InvalidTransition(self.state, CallState::Ended));
        }
        self.transition(CallState::Ended)?;
        Ok(SignalMessage::Reject {
            call_id,
            reason: reason.map(String::from),
        })
    }

    /// End the call from this side. While still connecting there is no
    /// call id yet, so nothing has to be sent to the peer.
    pub fn hang_up(&mut self) -> ClientResult<Option<SignalMessage>> {
        self.transition(CallState::Ended)?;
        Ok(self
            .call_id
            .clone()
            .map(|call_id| SignalMessage::Hangup { call_id }))
    }

    /// Transport or media failure
    pub fn fail(&mut self, reason: impl Into<String>) -> ClientResult<()> {
        let reason = reason.into();
        self.transition(CallState::Failed)?;
        warn!("Call failed: {}", reason);
        self.failure = Some(reason);
        Ok(())
    }

    /// Return to idle after a finished call
    pub fn reset(&mut self) -> ClientResult<()> {
        self.transition(CallState::Idle)?;
        self.call_id = None;
        self.peer = None;
        self.failure = None;
        Ok(())
    }

    /// Apply a message received from the signaling socket
    pub fn handle(&mut self, message: &SignalMessage) -> ClientResult<CallState> {
        if let SignalMessage::CallRequest { call_id, from, .. } = message {
            self.transition(CallState::Incoming)?;
            self.call_id = Some(call_id.clone());
            self.peer = Some(from.clone());
            info!("Incoming call {} from {}", call_id, from);
            return Ok(self.state);
        }

        if self.call_id.as_deref() != Some(message.call_id()) {
            debug!("Ignoring signal for unrelated call {}", message.call_id());
            return Ok(self.state);
        }

        match message {
            SignalMessage::Accept { .. } if self.state == CallState::Outgoing => {
                self.transition(CallState::InCall)?
            }
            SignalMessage::Accept { .. } => {
                return Err(ClientError::InvalidTransition(self.state, CallState::InCall))
            }
            SignalMessage::Reject { .. } | SignalMessage::Hangup { .. } => {
                self.transition(CallState::Ended)?
            }
            SignalMessage::Offer { .. }
            | SignalMessage::Answer { .. }
            | SignalMessage::IceCandidate { .. } => {
                if !self.state.is_active() {
                    debug!("Dropping media negotiation in state {}", self.state);
                }
            }
            SignalMessage::CallRequest { .. } => {}
        }
        Ok(self.state)
    }

    fn require_call_id(&self) -> ClientResult<String> {
        self.call_id
            .clone()
            .ok_or_else(|| ClientError::Validation("no call in progress".to_string()))
    }
}
