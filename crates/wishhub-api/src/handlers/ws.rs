//! WebSocket upgrade handler.
//!
//! The handshake carries the same bearer credential as the request
//! surface, as a query parameter. Connections presenting no credential
//! are still established but cannot subscribe to private-wishlist rooms;
//! connections presenting an invalid credential are refused.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use wishhub_realtime::ConnectionIdentity;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for WebSocket authentication.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// Bearer credential. Optional: absent means unauthenticated.
    pub token: Option<String>,
}

/// GET /ws?token={jwt} — WebSocket upgrade.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, ApiError> {
    // Authenticate before upgrade. A present-but-invalid token is an
    // error; an absent token yields an unauthenticated connection.
    let identity = match query.token {
        Some(token) => {
            let claims = state.jwt_decoder.decode(&token)?;
            let identity = ConnectionIdentity {
                user_id: claims.user_id(),
                name: claims.name.clone(),
            };
            state.users.upsert(wishhub_entity::user::UserSummary::new(
                claims.user_id(),
                claims.name,
                claims.email,
            ));
            Some(identity)
        }
        None => None,
    };

    Ok(ws.on_upgrade(move |socket| handle_connection(state, identity, socket)))
}

/// Handles an established WebSocket connection.
async fn handle_connection(state: AppState, identity: Option<ConnectionIdentity>, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = state.realtime.connections.register(identity);
    let conn_id = handle.id;

    info!(conn_id = %conn_id, "WebSocket connection established");

    // Forward queued outbound frames to the peer.
    let outbound_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // Process inbound messages until the peer goes away.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                state
                    .realtime
                    .connections
                    .handle_inbound(conn_id, text.as_str())
                    .await;
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.realtime.connections.unregister(conn_id);

    info!(conn_id = %conn_id, "WebSocket connection closed");
}
