//! WebSocket endpoint for the embedding host
//!
//! One connection is one game session. Inbound frames decode to host
//! signals and feed the session's input channel; outbound commands stream
//! back over the same socket. A panicked session task is the process-wide
//! fault path: it is reported to the host as an `Error` command.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::atomic::Ordering;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::app::AppState;
use crate::game::{GameSession, SessionConfig, Viewport};
use crate::util::rate_limit::HostRateLimiter;

use super::protocol::{GameCommand, HostSignal};

/// WebSocket upgrade handler for `/egi`
pub async fn egi_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle the upgraded host connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let session_id = Uuid::new_v4();
    state.active_sessions.fetch_add(1, Ordering::Relaxed);
    info!(session_id = %session_id, "Host connected");

    let (mut ws_sink, mut ws_stream) = socket.split();

    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<GameCommand>();
    let (sig_tx, sig_rx) = mpsc::channel::<HostSignal>(256);

    let config = SessionConfig {
        viewport: Viewport {
            width: state.config.viewport_width,
            height: state.config.viewport_height,
        },
        obstacle_hits_cost_life: state.config.obstacle_hits_cost_life,
        seed: state.config.rng_seed.unwrap_or_else(rand::random),
    };
    let session = GameSession::new(config, state.scores.clone(), cmd_tx.clone(), sig_rx);
    let mut session_task = tokio::spawn(session.run());

    // Writer task: session commands -> socket
    let writer_session_id = session_id;
    let writer = tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            if let Err(e) = send_command(&mut ws_sink, &cmd).await {
                debug!(session_id = %writer_session_id, error = %e, "Socket send failed");
                break;
            }
        }
    });

    let rate_limiter = HostRateLimiter::new();
    let mut session_done = false;

    loop {
        tokio::select! {
            result = &mut session_task => {
                session_done = true;
                report_if_panicked(result, &cmd_tx, session_id);
                break;
            }
            msg = ws_stream.next() => {
                let Some(result) = msg else { break };
                match result {
                    Ok(Message::Text(text)) => {
                        if !rate_limiter.check_signal() {
                            warn!(session_id = %session_id, "Rate limited host signal");
                            continue;
                        }

                        // Malformed and unknown frames are forward-compat
                        // no-ops, never errors
                        match serde_json::from_str::<HostSignal>(&text) {
                            Ok(signal) => {
                                if sig_tx.send(signal).await.is_err() {
                                    debug!(session_id = %session_id, "Signal channel closed");
                                    break;
                                }
                            }
                            Err(e) => {
                                debug!(session_id = %session_id, error = %e, "Ignoring malformed host frame");
                            }
                        }
                    }
                    Ok(Message::Binary(_)) => {
                        warn!(session_id = %session_id, "Received binary frame, ignoring");
                    }
                    Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
                    Ok(Message::Close(_)) => {
                        info!(session_id = %session_id, "Host initiated close");
                        break;
                    }
                    Err(e) => {
                        error!(session_id = %session_id, error = %e, "Socket error");
                        break;
                    }
                }
            }
        }
    }

    // Closing the signal channel lets the session loop finish
    drop(sig_tx);
    if !session_done {
        let result = session_task.await;
        report_if_panicked(result, &cmd_tx, session_id);
    }

    // Writer drains what is left, then ends with the last sender
    drop(cmd_tx);
    let _ = writer.await;

    state.active_sessions.fetch_sub(1, Ordering::Relaxed);
    info!(session_id = %session_id, "Host disconnected");
}

/// Surface a panicked session task to the host as an `Error` command
fn report_if_panicked(
    result: Result<(), tokio::task::JoinError>,
    cmd_tx: &mpsc::UnboundedSender<GameCommand>,
    session_id: Uuid,
) {
    if let Err(e) = result {
        if e.is_panic() {
            error!(session_id = %session_id, error = %e, "Session task panicked");
            let _ = cmd_tx.send(GameCommand::fault("panic", "session", Some(e.to_string())));
        }
    }
}

/// Send a command over the socket
async fn send_command(
    sink: &mut futures::stream::SplitSink<WebSocket, Message>,
    cmd: &GameCommand,
) -> Result<(), String> {
    let json = serde_json::to_string(cmd).map_err(|e| e.to_string())?;
    sink.send(Message::Text(json))
        .await
        .map_err(|e| e.to_string())
}
