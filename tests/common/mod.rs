#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Request, State};
use axum::response::Response;
use axum::routing::any;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use runebot::config::Config;
use runebot::error::Error;
use runebot::gateway::GatewayClient;
use runebot::rest::RestClient;
use runebot::runes::RuneBook;

/// One outbound REST call the bot made against the mock API.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Value,
}

#[derive(Clone)]
struct ApiState {
    gateway_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn record_request(State(state): State<ApiState>, req: Request) -> Json<Value> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    if method == "GET" && path == "/gateway" {
        return Json(json!({ "url": state.gateway_url }));
    }
    let bytes = axum::body::to_bytes(req.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    state
        .requests
        .lock()
        .unwrap()
        .push(RecordedRequest { method, path, body });
    Json(json!({}))
}

/// Spawn a mock REST API that answers `/gateway` with the given WebSocket
/// URL and records every other request, returning 200 `{}`.
pub async fn spawn_api(gateway_url: &str) -> (String, Arc<Mutex<Vec<RecordedRequest>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = ApiState {
        gateway_url: gateway_url.to_string(),
        requests: Arc::clone(&requests),
    };
    let app = Router::new().fallback(record_request).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://127.0.0.1:{}", addr.port()), requests)
}

/// Behavior of the mock gateway for one test: how many HELLO frames to send
/// on connect, what to send once IDENTIFY arrives (raw frame text, so tests
/// can inject malformed data), and whether to close afterwards.
#[derive(Clone)]
pub struct GatewayScript {
    pub heartbeat_interval_ms: u64,
    /// Raw frame text sent on connect before any HELLO.
    pub preamble: Vec<String>,
    pub hellos: u32,
    pub after_identify: Vec<String>,
    pub close_after_identify: bool,
}

impl Default for GatewayScript {
    fn default() -> Self {
        Self {
            heartbeat_interval_ms: 60_000,
            preamble: Vec::new(),
            hellos: 1,
            after_identify: Vec::new(),
            close_after_identify: false,
        }
    }
}

#[derive(Clone)]
struct GatewayState {
    script: GatewayScript,
    received: Arc<Mutex<Vec<Value>>>,
}

async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<GatewayState>) -> Response {
    ws.on_upgrade(move |socket| run_script(socket, state))
}

async fn run_script(mut socket: WebSocket, state: GatewayState) {
    for raw in &state.script.preamble {
        if socket
            .send(Message::Text(raw.clone().into()))
            .await
            .is_err()
        {
            return;
        }
    }
    for _ in 0..state.script.hellos {
        let hello = json!({
            "op": 10,
            "s": null,
            "t": null,
            "d": { "heartbeat_interval": state.script.heartbeat_interval_ms }
        });
        if socket
            .send(Message::Text(hello.to_string().into()))
            .await
            .is_err()
        {
            return;
        }
    }

    while let Some(Ok(msg)) = socket.recv().await {
        let Message::Text(text) = msg else { continue };
        let Ok(frame) = serde_json::from_str::<Value>(text.as_str()) else {
            continue;
        };
        let is_identify = frame["op"] == 2;
        state.received.lock().unwrap().push(frame);
        if is_identify {
            for raw in &state.script.after_identify {
                if socket
                    .send(Message::Text(raw.clone().into()))
                    .await
                    .is_err()
                {
                    return;
                }
            }
            if state.script.close_after_identify {
                // Keep reading after the close so any frame the client
                // wrongly sends afterwards still gets recorded.
                let _ = socket.send(Message::Close(None)).await;
            }
        }
    }
}

/// Spawn a scripted mock gateway; returns its ws:// URL and the frames it
/// received from the client.
pub async fn spawn_gateway(script: GatewayScript) -> (String, Arc<Mutex<Vec<Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = GatewayState {
        script,
        received: Arc::clone(&received),
    };
    let app = Router::new().route("/", any(ws_upgrade)).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("ws://127.0.0.1:{}/", addr.port()), received)
}

pub fn test_config(api_url: &str) -> Config {
    Config {
        token: "test-token".to_string(),
        api_url: api_url.to_string(),
        command_prefix: "!rune".to_string(),
        bot_username: "LeagueRuneBot".to_string(),
        bot_user_id: Some("999".to_string()),
    }
}

/// Run the full client (REST discovery + gateway session) in the background.
pub fn spawn_client(config: Config) -> tokio::task::JoinHandle<Result<(), Error>> {
    tokio::spawn(async move {
        let config = Arc::new(config);
        let rest = Arc::new(RestClient::new(config.api_url.clone(), config.token.clone()));
        let runes = Arc::new(RuneBook::new());
        GatewayClient::new(config, rest, runes).run().await
    })
}

/// A MESSAGE_CREATE dispatch frame as raw text.
pub fn message_create(
    seq: u64,
    author_id: &str,
    username: &str,
    channel_id: &str,
    content: &str,
) -> String {
    json!({
        "op": 0,
        "s": seq,
        "t": "MESSAGE_CREATE",
        "d": {
            "id": format!("m{seq}"),
            "channel_id": channel_id,
            "content": content,
            "author": { "id": author_id, "username": username }
        }
    })
    .to_string()
}

/// Poll `predicate` until it holds or `timeout` elapses.
pub async fn wait_until<F: Fn() -> bool>(predicate: F, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if predicate() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    predicate()
}
