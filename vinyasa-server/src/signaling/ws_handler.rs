use crate::coordinator::Coordinator;
use crate::signaling::SignalingService;
use axum::Router;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, Query, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use vinyasa_core::{ClientMessage, Role, ServerEvent, SessionId, UserId};

/// Shared state for the WebSocket gateway.
#[derive(Clone)]
pub struct GatewayState {
    pub service: SignalingService,
    pub coordinator: Arc<Coordinator>,
}

#[derive(Debug, Deserialize)]
pub struct AdmitQuery {
    role: Option<Role>,
}

/// Route table for the gateway: one upgrade endpoint per connection,
/// tagged with the session and user the handshake layer already
/// authorized.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/ws/{session_id}/{user_id}", get(ws_handler))
        .with_state(state)
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path((session_id, user_id)): Path<(String, String)>,
    Query(query): Query<AdmitQuery>,
    State(state): State<GatewayState>,
) -> impl IntoResponse {
    let session_id = SessionId::from(session_id);
    let user_id = UserId::from(user_id);
    let role = query.role.unwrap_or_default();

    ws.on_upgrade(move |socket| handle_socket(socket, session_id, user_id, role, state))
}

async fn handle_socket(
    socket: WebSocket,
    session_id: SessionId,
    user_id: UserId,
    role: Role,
    state: GatewayState,
) {
    info!("New WebSocket connection: {user_id} -> session {session_id}");

    let (mut sender, mut receiver) = socket.split();

    let handle = match state
        .coordinator
        .admit(session_id.clone(), user_id.clone(), role)
        .await
    {
        Ok(handle) => handle,
        Err(e) => {
            warn!("Admission rejected for {user_id} in session {session_id}: {e}");
            let event = ServerEvent::Error {
                message: e.to_string(),
            };
            if let Ok(json) = serde_json::to_string(&event) {
                let _ = sender.send(Message::Text(json.into())).await;
            }
            return;
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    state.service.add_peer(handle, tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let coordinator = state.coordinator.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(ClientMessage::Leave) => break,
                        Ok(message) => coordinator.handle_message(handle, message).await,
                        Err(e) => warn!("Invalid client message from {handle}: {e:?}"),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }

            // Transport close is the only cancellation signal; removal
            // runs synchronously from this close path.
            coordinator.remove(handle).await;
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    state.service.remove_peer(&handle);
    // Covers the send-task-first exit; a second remove is a no-op.
    state.coordinator.remove(handle).await;
    info!("WebSocket disconnected: {handle}");
}
