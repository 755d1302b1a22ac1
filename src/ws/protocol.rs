//! WebSocket protocol message definitions
//! These are the wire types for client-server communication

use serde::Deserialize;
use serde_json::Value;

/// Sent once a connection opens, before the player is admitted
pub const GREETING: &str = "Hello, Client!";
/// Reply to an applied action
pub const ACTION_ACCEPTED: &str = "Action received: move";
/// Reply to an action the player does not understand
pub const ACTION_REJECTED: &str = "Invalid action";

/// Messages sent from client to server
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    /// Steering action, e.g. `{"type": "action", "action": "left"}`
    Action { action: String },
}

/// Classification of one inbound text frame
#[derive(Debug)]
pub enum Inbound {
    Msg(ClientMsg),
    /// Not valid JSON
    Malformed(serde_json::Error),
    /// JSON with a `type` this server does not handle, or missing fields
    Unrecognized(Value),
    /// JSON without a `type` key
    Untyped,
}

pub fn parse_client_msg(text: &str) -> Inbound {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return Inbound::Malformed(e),
    };

    if value.get("type").is_none() {
        return Inbound::Untyped;
    }

    match ClientMsg::deserialize(&value) {
        Ok(msg) => Inbound::Msg(msg),
        Err(_) => Inbound::Unrecognized(value),
    }
}
