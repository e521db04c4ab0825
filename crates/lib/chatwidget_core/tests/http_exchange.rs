//! Integration test — serve a stub `POST /chat` on an ephemeral port and drive
//! the handler through the real HTTP transport.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chatwidget_core::config::DEFAULT_FALLBACK_TEXT;
use chatwidget_core::exchange::{ExchangeOutcome, TransportError};
use chatwidget_core::view::InputField;
use chatwidget_core::view::memory::{MemoryAlerter, MemoryInput, MemoryLog};
use chatwidget_core::{ChatEntry, ChatInputHandler, HandlerConfig, HttpTransport, SubmitError};
use serde_json::{Value, json};
use url::Url;

#[derive(Clone, Default)]
struct Recorded {
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });
    addr
}

/// Serves `POST /chat` answering with `reply`, recording content type and body.
async fn stub_with(recorded: Recorded, reply: fn(&Value) -> Response) -> Url {
    async fn chat(
        State((recorded, reply)): State<(Recorded, fn(&Value) -> Response)>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Response {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let response = reply(&body);
        recorded.requests.lock().unwrap().push((content_type, body));
        response
    }

    let router = Router::new()
        .route("/chat", post(chat))
        .with_state((recorded, reply));
    let addr = serve(router).await;
    Url::parse(&format!("http://{addr}/chat")).unwrap()
}

fn handler_for(
    endpoint: Url,
    config: HandlerConfig,
    typed: &str,
) -> (
    ChatInputHandler<HttpTransport, MemoryInput, MemoryLog, MemoryAlerter>,
    MemoryInput,
    MemoryLog,
) {
    let input = MemoryInput::new(typed);
    let log = MemoryLog::new();
    let handler = ChatInputHandler::new(
        config,
        HttpTransport::new(endpoint),
        input.clone(),
        log.clone(),
        MemoryAlerter::default(),
    );
    (handler, input, log)
}

#[tokio::test]
async fn posts_json_message_and_renders_reply() {
    let recorded = Recorded::default();
    let endpoint = stub_with(recorded.clone(), |_| {
        Json(json!({ "response": "hi there" })).into_response()
    })
    .await;
    let (handler, input, log) = handler_for(endpoint, HandlerConfig::defensive(), "hello");

    handler.submit().await.expect("submit");

    assert_eq!(
        log.entries(),
        vec![ChatEntry::user("hello"), ChatEntry::bot("hi there")]
    );
    assert_eq!(input.value(), "");

    let requests = recorded.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    let (content_type, body) = &requests[0];
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, &json!({ "message": "hello" }));
}

#[tokio::test]
async fn server_error_leaves_log_and_input() {
    let recorded = Recorded::default();
    let endpoint = stub_with(recorded.clone(), |_| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "model crashed" })),
        )
            .into_response()
    })
    .await;
    let (handler, input, log) = handler_for(endpoint, HandlerConfig::defensive(), "ping");

    let err = handler.submit().await.unwrap_err();

    assert!(matches!(err, SubmitError::Status(500)));
    assert!(log.is_empty());
    assert_eq!(input.value(), "ping");
    assert_eq!(recorded.requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn reply_without_response_uses_fallback() {
    let endpoint = stub_with(Recorded::default(), |_| Json(json!({})).into_response()).await;
    let (handler, _, log) = handler_for(endpoint, HandlerConfig::defensive(), "hello");

    handler.submit().await.expect("submit");

    assert_eq!(log.entries()[1], ChatEntry::bot(DEFAULT_FALLBACK_TEXT));
}

#[tokio::test]
async fn null_response_uses_fallback() {
    let endpoint = stub_with(Recorded::default(), |_| {
        Json(json!({ "response": null })).into_response()
    })
    .await;
    let (handler, _, log) = handler_for(endpoint, HandlerConfig::defensive(), "hello");

    handler.submit().await.expect("submit");

    assert_eq!(log.entries()[1], ChatEntry::bot(DEFAULT_FALLBACK_TEXT));
}

#[tokio::test]
async fn html_body_is_a_decode_failure() {
    let endpoint = stub_with(Recorded::default(), |_| {
        ([(header::CONTENT_TYPE, "text/html")], "<h1>hi</h1>").into_response()
    })
    .await;
    let (handler, input, log) = handler_for(endpoint, HandlerConfig::defensive(), "hello");

    let err = handler.submit().await.unwrap_err();

    assert!(matches!(err, SubmitError::Transport(TransportError::Decode(_))));
    assert!(log.is_empty());
    assert_eq!(input.value(), "hello");
}

#[tokio::test]
async fn minimal_config_renders_error_status_body() {
    let endpoint = stub_with(Recorded::default(), |body| {
        let echoed = body["message"].as_str().unwrap_or_default().to_uppercase();
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "response": echoed })),
        )
            .into_response()
    })
    .await;
    let (handler, _, _) = handler_for(endpoint, HandlerConfig::minimal(), "busy?");

    match handler.exchange("busy?").await {
        ExchangeOutcome::Success(payload) => assert_eq!(payload["response"], "BUSY?"),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_endpoint_is_a_request_failure() {
    // Bind then drop so the port is closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = Url::parse(&format!("http://{addr}/chat")).unwrap();
    let (handler, input, log) =
        handler_for(endpoint, HandlerConfig::defensive(), "anyone there?");

    let err = handler.submit().await.unwrap_err();

    assert!(matches!(err, SubmitError::Transport(TransportError::Request(_))));
    assert!(log.is_empty());
    assert_eq!(input.value(), "anyone there?");
}
