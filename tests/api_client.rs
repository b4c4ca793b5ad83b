use offre_client::types::chat::{MessageType, SendMessageRequest};
use offre_client::types::interview::{InterviewMode, InvitationStatus, SendInvitationRequest};
use offre_client::{ApiClient, ApiConfig, ClientError, InterviewClient, InterviewSession};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Raw request as received by the stub: request line, headers, body
#[derive(Debug, Clone)]
struct Recorded {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Recorded {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

struct Stub {
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// Serve the canned responses in order, one connection each
async fn spawn_stub(responses: Vec<(u16, &'static str)>) -> Stub {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            recorded.lock().unwrap().push(request);

            let response = format!(
                "HTTP/1.1 {} STUB\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        }
    });

    Stub {
        base_url: format!("http://{}", addr),
        requests,
    }
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Recorded {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Recorded {
        request_line,
        headers,
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    }
}

fn client_for(stub: &Stub) -> ApiClient {
    ApiClient::new(
        ApiConfig::development()
            .with_base_url(stub.base_url.clone())
            .with_ai_base_url(stub.base_url.clone())
            .with_timeout(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_login_then_authenticated_request() {
    let stub = spawn_stub(vec![
        (
            201,
            r#"{"access_token":"tok-123","user":{"_id":"u1","email":"a@b.com","role":"student"}}"#,
        ),
        (200, r#"[{"_id":"o1","title":"Stage Rust","tags":["rust"]}]"#),
    ])
    .await;

    let mut client = client_for(&stub);
    let session = client.login("a@b.com", "secret").await.unwrap();
    assert_eq!(session.user_id(), Some("u1"));
    assert_eq!(client.token(), Some("tok-123"));

    let offers = client.search_offers("rust dev").await.unwrap();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].tags, vec!["rust"]);

    let requests = stub.requests.lock().unwrap().clone();
    assert_eq!(requests[0].request_line, "POST /auth/login HTTP/1.1");
    let login_body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(login_body["email"], "a@b.com");
    assert!(requests[0].header("authorization").is_none());

    assert_eq!(requests[1].request_line, "GET /offre/search?q=rust%20dev HTTP/1.1");
    assert_eq!(requests[1].header("authorization"), Some("Bearer tok-123"));
}

#[tokio::test]
async fn test_status_codes_map_to_taxonomy() {
    let stub = spawn_stub(vec![
        (404, r#"{"statusCode":404,"message":"Offre not found"}"#),
        (401, r#"{"message":"Unauthorized"}"#),
        (503, "maintenance"),
    ])
    .await;
    let client = client_for(&stub);

    match client.offer("missing").await {
        Err(ClientError::NotFound(msg)) => assert_eq!(msg, "Offre not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert!(matches!(client.me().await, Err(ClientError::Unauthorized(_))));

    let err = client.my_chats().await.unwrap_err();
    assert!(err.is_transient());
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let stub = spawn_stub(vec![(200, r#"{"unexpected":true}"#)]).await;
    let client = client_for(&stub);

    match client.offers().await {
        Err(ClientError::Decode(msg)) => assert!(msg.contains("unexpected")),
        other => panic!("expected Decode, got {:?}", other),
    }
}

#[tokio::test]
async fn test_chat_paths_on_the_wire() {
    let stub = spawn_stub(vec![
        (200, r#"{"messages":[],"total":0,"page":2,"limit":20}"#),
        (201, r#"{"_id":"m1","sender":"u1","content":"Bonjour","type":"text"}"#),
        (200, "{}"),
    ])
    .await;
    let client = client_for(&stub).with_token("t");

    client.chat_messages("c 1", Some(2), Some(20)).await.unwrap();
    let sent = client
        .send_message("c 1", &SendMessageRequest::text("Bonjour"))
        .await
        .unwrap();
    assert_eq!(sent.content.as_deref(), Some("Bonjour"));
    client.mark_chat_read("c 1").await.unwrap();

    let requests = stub.requests.lock().unwrap().clone();
    assert_eq!(
        requests[0].request_line,
        "GET /chat/c%201/messages?page=2&limit=20 HTTP/1.1"
    );
    assert_eq!(requests[1].request_line, "POST /chat/c%201/message HTTP/1.1");
    assert_eq!(requests[2].request_line, "POST /chat/c%201/mark-read HTTP/1.1");
}

#[tokio::test]
async fn test_delete_ignores_body() {
    let stub = spawn_stub(vec![(200, r#"{"deleted":true}"#)]).await;
    let client = client_for(&stub);
    client.delete_offer("o1").await.unwrap();

    let requests = stub.requests.lock().unwrap().clone();
    assert_eq!(requests[0].request_line, "DELETE /offre/o1 HTTP/1.1");
}

#[tokio::test]
async fn test_interview_text_turns_accumulate() {
    let stub = spawn_stub(vec![
        (200, r#"{"reply":"Parlez-moi de votre projet"}"#),
        (200, r#"{"response":"Merci","is_finished":true}"#),
        (
            200,
            r#"{"overall_score":7.5,"strengths":["clarté"],"recommendations":["Structurer"]}"#,
        ),
    ])
    .await;
    let interview = InterviewClient::new(client_for(&stub));
    let mut session = InterviewSession::new("u1", InterviewMode::Coaching);

    interview.send_text(&mut session, "Bonjour").await.unwrap();
    let last = interview
        .send_text(&mut session, "J'ai construit une API")
        .await
        .unwrap();
    assert!(last.is_finished);
    assert_eq!(session.turns().len(), 4);
    assert!(session.is_finished());

    let analysis = interview.analyze(&session).await.unwrap();
    assert_eq!(analysis.overall_score, 7.5);

    let requests = stub.requests.lock().unwrap().clone();
    assert_eq!(requests[0].request_line, "POST /api/chat HTTP/1.1");
    let second: serde_json::Value = serde_json::from_str(&requests[1].body).unwrap();
    assert_eq!(second["history"].as_array().unwrap().len(), 2);
    assert_eq!(second["mode"], "coaching");
    assert_eq!(requests[2].request_line, "POST /api/analyze-interview HTTP/1.1");
}

#[tokio::test]
async fn test_network_failure_is_transient() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(
        ApiConfig::development()
            .with_base_url(format!("http://{}", addr))
            .with_timeout(2),
    )
    .unwrap();

    let err = client.offers().await.unwrap_err();
    assert!(err.is_transient(), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn test_collapsing_identifiers_never_reach_the_server() {
    let stub = spawn_stub(vec![]).await;
    let client = client_for(&stub).with_token("t");

    assert!(matches!(
        client.delete_availability("").await,
        Err(ClientError::Validation(_))
    ));
    assert!(matches!(
        client.delete_offer("..").await,
        Err(ClientError::Validation(_))
    ));
    assert!(client.chat_messages(".", None, None).await.is_err());

    let interview = InterviewClient::new(client);
    assert!(interview.pending_invitations("").await.is_err());

    assert!(stub.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_action_endpoints_post_without_body() {
    let stub = spawn_stub(vec![
        (201, r#"{"liked":true,"likesCount":3}"#),
        (200, r#"{"_id":"c1","isBlocked":true}"#),
        (200, r#"{"_id":"c1","isAccepted":true}"#),
    ])
    .await;
    let client = client_for(&stub).with_token("t");

    let like = client.like_offer("o1").await.unwrap();
    assert!(like.liked);
    assert_eq!(like.likes_count, Some(3));
    assert!(client.block_chat("c1").await.unwrap().is_blocked);
    assert!(client.accept_chat("c1").await.unwrap().is_accepted);

    let requests = stub.requests.lock().unwrap().clone();
    assert_eq!(requests[0].request_line, "POST /offre/o1/like HTTP/1.1");
    assert_eq!(requests[1].request_line, "POST /chat/c1/block HTTP/1.1");
    assert_eq!(requests[2].request_line, "POST /chat/c1/accept HTTP/1.1");
    for request in &requests {
        assert!(request.body.is_empty());
        assert_eq!(request.header("authorization"), Some("Bearer t"));
    }
}

#[tokio::test]
async fn test_chat_upload_is_multipart() {
    let stub = spawn_stub(vec![(201, r#"{"url":"/uploads/photo.png","type":"image"}"#)]).await;
    let client = client_for(&stub).with_token("t");

    let uploaded = client
        .upload_chat_file(b"PNGDATA".to_vec(), "photo.png")
        .await
        .unwrap();
    assert_eq!(uploaded.url, "/uploads/photo.png");
    assert_eq!(uploaded.kind, Some(MessageType::Image));

    let requests = stub.requests.lock().unwrap().clone();
    assert_eq!(requests[0].request_line, "POST /chat/upload HTTP/1.1");
    assert!(requests[0]
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data; boundary="));
    let body = &requests[0].body;
    assert!(body.contains(r#"name="file""#));
    assert!(body.contains(r#"filename="photo.png""#));
    assert!(body.contains("image/png"));
    assert!(body.contains("PNGDATA"));
}

#[tokio::test]
async fn test_unsupported_upload_is_rejected_locally() {
    let stub = spawn_stub(vec![]).await;
    let client = client_for(&stub);

    assert!(matches!(
        client.upload_chat_file(vec![0u8; 4], "archive.zip").await,
        Err(ClientError::Validation(_))
    ));
    assert!(stub.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_voice_turn_is_multipart_with_history() {
    let stub = spawn_stub(vec![(
        200,
        r#"{"transcript":"Je suis motivé","reply":"Pourquoi ce poste ?","is_finished":false}"#,
    )])
    .await;
    let interview = InterviewClient::new(client_for(&stub));
    let mut session = InterviewSession::new("u1", InterviewMode::Coaching);
    session.record("Bonjour", "Présentez-vous", false);

    let reply = interview
        .send_voice(&mut session, b"AUDIO".to_vec(), "answer.m4a")
        .await
        .unwrap();
    assert_eq!(reply.reply, "Pourquoi ce poste ?");
    assert_eq!(session.turns().len(), 4);
    assert_eq!(session.turns()[2].content, "Je suis motivé");

    let requests = stub.requests.lock().unwrap().clone();
    assert_eq!(requests[0].request_line, "POST /api/voice-chat HTTP/1.1");
    assert!(requests[0]
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data"));
    let body = &requests[0].body;
    assert!(body.contains(r#"name="audio""#));
    assert!(body.contains(r#"filename="answer.m4a""#));
    assert!(body.contains("audio/mp4"));
    assert!(body.contains(r#"name="history""#));
    assert!(body.contains("Présentez-vous"));
    assert!(body.contains(r#"name="session_id""#));
    assert!(body.contains(&session.session_id));
    assert!(body.contains(r#"name="mode""#));
}

#[tokio::test]
async fn test_invitation_lifecycle() {
    let invitation = r#"{"_id":"i1","employer_id":"e1","candidate_id":"cand 1","offer_id":"o1","status":"pending"}"#;
    let stub = spawn_stub(vec![
        (201, invitation),
        (
            200,
            r#"{"_id":"i1","employer_id":"e1","candidate_id":"cand 1","status":"accepted"}"#,
        ),
        (
            200,
            r#"{"invitations":[{"_id":"i2","employer_id":"e2","candidate_id":"cand 1","status":"pending"}]}"#,
        ),
    ])
    .await;
    let interview = InterviewClient::new(client_for(&stub));

    let sent = interview
        .send_invitation(&SendInvitationRequest {
            employer_id: "e1".to_string(),
            candidate_id: "cand 1".to_string(),
            offer_id: "o1".to_string(),
            message: None,
        })
        .await
        .unwrap();
    assert_eq!(sent.status, InvitationStatus::Pending);

    let accepted = interview.accept_invitation("i1", "cand 1").await.unwrap();
    assert_eq!(accepted.status, InvitationStatus::Accepted);

    let pending = interview.pending_invitations("cand 1").await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].invitation_id, "i2");

    let requests = stub.requests.lock().unwrap().clone();
    assert_eq!(
        requests[0].request_line,
        "POST /api/send-interview-invitation HTTP/1.1"
    );
    let sent_body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(sent_body["candidate_id"], "cand 1");
    assert!(sent_body.get("message").is_none());

    assert_eq!(
        requests[1].request_line,
        "POST /api/accept-interview-invitation HTTP/1.1"
    );
    let decision: serde_json::Value = serde_json::from_str(&requests[1].body).unwrap();
    assert_eq!(decision["invitation_id"], "i1");
    assert_eq!(decision["user_id"], "cand 1");

    assert_eq!(
        requests[2].request_line,
        "GET /api/get-pending-invitations/cand%201 HTTP/1.1"
    );
}
