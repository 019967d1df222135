use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use futures_util::{SinkExt, StreamExt};
use packman_pursuit::constants::{TICK_MS, TICK_RATE};
use packman_pursuit::engine::GameEngine;
use packman_pursuit::server_protocol::{parse_client_message, ParsedClientMessage};
use packman_pursuit::types::{GameMode, RuntimeEvent};
use serde_json::{json, Value};
use tokio::sync::{mpsc, Mutex};
use tower_http::services::ServeDir;

const OUTBOUND_QUEUE: usize = 256;

static NEXT_SPECTATOR: AtomicU64 = AtomicU64::new(1);

type Arena = Arc<Mutex<Session>>;

#[derive(Clone, Debug)]
enum Frame {
    Text(String),
    Close { code: u16, reason: String },
}

/// What to do with a spectator whose outbound queue is full.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QueuePolicy {
    DropOnFull,
    DisconnectOnFull,
}

/// One shared game plus everyone watching or steering it.
struct Session {
    spectators: HashMap<u64, mpsc::Sender<Frame>>,
    game: GameEngine,
    seed: u32,
}

impl Session {
    fn new(seed: u32) -> Self {
        Self {
            spectators: HashMap::new(),
            game: GameEngine::new(seed),
            seed,
        }
    }

    fn join(&mut self, tx: mpsc::Sender<Frame>) -> u64 {
        let id = NEXT_SPECTATOR.fetch_add(1, Ordering::Relaxed);
        self.spectators.insert(id, tx);
        let hello = json!({
            "type": "welcome",
            "clientId": id,
            "seed": self.seed,
            "tickRate": TICK_RATE,
        });
        self.push_to(id, &hello, QueuePolicy::DisconnectOnFull);
        let snapshot = self.game.build_snapshot(false);
        self.push_to(
            id,
            &json!({ "type": "state", "snapshot": snapshot }),
            QueuePolicy::DisconnectOnFull,
        );
        println!("[server] spectator {id} joined ({} watching)", self.spectators.len());
        id
    }

    fn leave(&mut self, id: u64) {
        let Some(tx) = self.spectators.remove(&id) else {
            return;
        };
        let _ = tx.try_send(Frame::Close {
            code: 1000,
            reason: "disconnected".to_string(),
        });
        println!("[server] spectator {id} left ({} watching)", self.spectators.len());
    }

    fn push_to(&mut self, id: u64, message: &Value, policy: QueuePolicy) {
        let overflowed = self
            .spectators
            .get(&id)
            .is_some_and(|tx| tx.try_send(Frame::Text(message.to_string())).is_err());
        if overflowed && policy == QueuePolicy::DisconnectOnFull {
            self.leave(id);
        }
    }

    fn broadcast(&mut self, message: &Value, policy: QueuePolicy) {
        let payload = message.to_string();
        let overflowed: Vec<u64> = self
            .spectators
            .iter()
            .filter(|(_, tx)| tx.try_send(Frame::Text(payload.clone())).is_err())
            .map(|(id, _)| *id)
            .collect();
        if policy == QueuePolicy::DisconnectOnFull {
            for id in overflowed {
                self.leave(id);
            }
        }
    }

    /// Applies one inbound text frame from spectator `id`.
    fn handle_text(&mut self, id: u64, raw: &str) {
        match parse_client_message(raw) {
            None => self.push_to(
                id,
                &json!({ "type": "error", "message": "invalid message" }),
                QueuePolicy::DisconnectOnFull,
            ),
            Some(ParsedClientMessage::Ping { t }) => self.push_to(
                id,
                &json!({ "type": "pong", "t": t, "serverTime": now_ms() }),
                QueuePolicy::DropOnFull,
            ),
            Some(message) => {
                if let Some(command) = message.command() {
                    self.game.receive_command(command);
                }
            }
        }
    }

    fn tick(&mut self) {
        self.game.step();
        let snapshot = self.game.build_snapshot(true);
        for event in &snapshot.events {
            match event {
                RuntimeEvent::ModeChanged {
                    to: GameMode::GameOver,
                    ..
                } => println!(
                    "[server] game over: score {} level {}",
                    snapshot.score, snapshot.level
                ),
                RuntimeEvent::LevelCleared { level } => {
                    println!("[server] level {level} cleared: score {}", snapshot.score)
                }
                _ => {}
            }
        }
        self.broadcast(
            &json!({ "type": "state", "snapshot": snapshot }),
            QueuePolicy::DropOnFull,
        );
    }
}

#[tokio::main]
async fn main() {
    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let seed = resolve_seed(std::env::var("SEED").ok().as_deref());

    let arena: Arena = Arc::new(Mutex::new(Session::new(seed)));
    spawn_ticker(arena.clone());

    let mut app = Router::new()
        .route("/healthz", get(healthz))
        .route("/ws", get(upgrade))
        .with_state(arena);
    if let Some(root) = static_root() {
        println!("[server] serving files from {}", root.display());
        app = app.fallback_service(ServeDir::new(root));
    }

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(error) => {
            eprintln!("[server] cannot bind port {port}: {error}");
            std::process::exit(1);
        }
    };
    println!("[server] listening on :{port} (seed {seed}, {TICK_RATE} ticks/s)");
    if let Err(error) = axum::serve(listener, app).await {
        eprintln!("[server] stopped: {error}");
        std::process::exit(1);
    }
}

fn parse_seed(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse::<u32>().ok()
}

fn resolve_seed(raw: Option<&str>) -> u32 {
    parse_seed(raw).unwrap_or_else(rand::random::<u32>)
}

fn static_root() -> Option<PathBuf> {
    let root = PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()));
    root.join("index.html").is_file().then_some(root)
}

async fn healthz() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

async fn upgrade(ws: WebSocketUpgrade, State(arena): State<Arena>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| serve_spectator(arena, socket))
}

async fn serve_spectator(arena: Arena, socket: WebSocket) {
    let (tx, mut rx) = mpsc::channel::<Frame>(OUTBOUND_QUEUE);
    let id = arena.lock().await.join(tx);

    let (mut sink, mut stream) = socket.split();
    let writer = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let (message, last) = match frame {
                Frame::Text(payload) => (Message::Text(payload.into()), false),
                Frame::Close { code, reason } => (
                    Message::Close(Some(CloseFrame {
                        code,
                        reason: reason.into(),
                    })),
                    true,
                ),
            };
            if sink.send(message).await.is_err() || last {
                break;
            }
        }
    });

    while let Some(Ok(message)) = stream.next().await {
        match message {
            Message::Text(raw) => arena.lock().await.handle_text(id, raw.as_str()),
            Message::Close(_) => break,
            _ => {}
        }
    }

    arena.lock().await.leave(id);
    let _ = writer.await;
}

fn spawn_ticker(arena: Arena) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(TICK_MS));
        loop {
            interval.tick().await;
            arena.lock().await.tick();
        }
    });
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
