//! WebSocket upgrade handler

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::StreamExt;
use tracing::debug;

use crate::app::AppState;
use crate::ws::session::{run_session, Connection, SessionLimits, TransportError};

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle the upgraded WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let limits = SessionLimits::from_config(&state.config);
    run_session(AxumConnection { socket }, state.room.clone(), limits).await;
}

/// Text-frame view of an axum WebSocket
struct AxumConnection {
    socket: WebSocket,
}

impl Connection for AxumConnection {
    async fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        self.socket
            .send(Message::Text(text))
            .await
            .map_err(|e| TransportError::Other(e.to_string()))
    }

    async fn recv_text(&mut self) -> Result<Option<String>, TransportError> {
        while let Some(result) = self.socket.next().await {
            match result {
                Ok(Message::Text(text)) => return Ok(Some(text)),
                Ok(Message::Binary(_)) => {
                    debug!("Received binary message, ignoring");
                }
                Ok(Message::Ping(_)) => {
                    debug!("Received ping");
                }
                Ok(Message::Pong(_)) => {
                    debug!("Received pong");
                }
                Ok(Message::Close(_)) => return Ok(None),
                Err(e) => return Err(TransportError::Other(e.to_string())),
            }
        }
        Ok(None)
    }
}
