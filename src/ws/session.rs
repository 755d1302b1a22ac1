//! Per-connection session: admission, input loop and guaranteed removal

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::game::{ConnectionId, InputOutcome, PlayerId, SharedRoom};
use crate::util::rate_limit::InputRateLimiter;

use super::protocol::{
    parse_client_msg, ClientMsg, Inbound, ACTION_ACCEPTED, ACTION_REJECTED, GREETING,
};

/// Transport errors
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Transport error: {0}")]
    Other(String),
}

/// Text-frame transport a session runs over
pub trait Connection: Send {
    /// Send one text frame
    fn send_text(&mut self, text: String)
        -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Next text frame, or `None` once the peer has closed
    fn recv_text(&mut self) -> impl Future<Output = Result<Option<String>, TransportError>> + Send;
}

/// Per-session limits
#[derive(Debug, Clone, Copy)]
pub struct SessionLimits {
    pub idle_timeout: Duration,
    pub input_rate_limit: u32,
}

impl SessionLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            idle_timeout: config.idle_timeout,
            input_rate_limit: config.input_rate_limit,
        }
    }
}

/// How a session finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Greeting could not be sent; no player was admitted
    GreetingFailed,
    Closed,
    TransportError,
    IdleTimeout,
}

/// Room membership for one session. Dropping it removes the player.
struct Membership {
    room: SharedRoom,
    player_id: PlayerId,
}

impl Membership {
    fn admit(room: SharedRoom, connection: ConnectionId) -> Self {
        let player_id = room.write().admit(connection).id;
        info!(player_id = %player_id, connection = %connection, "Player created");
        Self { room, player_id }
    }
}

impl Drop for Membership {
    fn drop(&mut self) {
        match self.room.write().remove(self.player_id) {
            Ok(_) => info!(player_id = %self.player_id, "Player removed"),
            Err(e) => error!(player_id = %self.player_id, error = %e, "Failed to remove player"),
        }
    }
}

/// Run one client session to completion.
///
/// Greets the client, admits a player, then answers action messages until
/// the connection closes, errors or idles out. The player is removed exactly
/// once on every exit path, including cancellation of this future.
pub async fn run_session<C: Connection>(
    mut conn: C,
    room: SharedRoom,
    limits: SessionLimits,
) -> SessionEnd {
    let connection = ConnectionId::new();
    info!(connection = %connection, "New connection");

    if let Err(e) = conn.send_text(GREETING.to_string()).await {
        warn!(connection = %connection, error = %e, "Failed to send greeting");
        return SessionEnd::GreetingFailed;
    }

    let membership = Membership::admit(room.clone(), connection);
    let player_id = membership.player_id;
    let rate_limiter = InputRateLimiter::new(limits.input_rate_limit);

    let end = loop {
        let text = match timeout(limits.idle_timeout, conn.recv_text()).await {
            Ok(Ok(Some(text))) => text,
            Ok(Ok(None)) => {
                info!(player_id = %player_id, "Client closed connection");
                break SessionEnd::Closed;
            }
            Ok(Err(e)) => {
                warn!(player_id = %player_id, error = %e, "Connection error");
                break SessionEnd::TransportError;
            }
            Err(_) => {
                info!(player_id = %player_id, "Connection idle, closing");
                break SessionEnd::IdleTimeout;
            }
        };

        if !rate_limiter.check() {
            warn!(player_id = %player_id, "Rate limited input message");
            continue;
        }

        if let Some(reply) = handle_text(&room, player_id, &text) {
            if let Err(e) = conn.send_text(reply.to_string()).await {
                debug!(player_id = %player_id, error = %e, "Send failed");
                break SessionEnd::TransportError;
            }
        }
    };

    drop(membership);
    info!(connection = %connection, reason = ?end, "Connection closed");
    end
}

/// Apply one inbound frame; returns the reply to send, if any
fn handle_text(room: &SharedRoom, player_id: PlayerId, text: &str) -> Option<&'static str> {
    match parse_client_msg(text) {
        Inbound::Msg(ClientMsg::Action { action }) => {
            info!(player_id = %player_id, action = %action, "Received action");
            let outcome = room.write().handle_input(player_id, &action);
            match outcome {
                Ok(InputOutcome::Applied) => Some(ACTION_ACCEPTED),
                Ok(InputOutcome::IgnoredUnrecognized) => Some(ACTION_REJECTED),
                Err(e) => {
                    error!(player_id = %player_id, error = %e, "Input for player outside room");
                    None
                }
            }
        }
        Inbound::Malformed(e) => {
            warn!(player_id = %player_id, error = %e, "Invalid JSON message");
            None
        }
        Inbound::Unrecognized(value) => {
            warn!(player_id = %player_id, payload = %value, "Invalid message type");
            None
        }
        Inbound::Untyped => {
            debug!(player_id = %player_id, "Message without type, ignoring");
            None
        }
    }
}
