use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Opcodes the gateway exchanges. The wire value is the raw integer in the
/// frame's `op` field; anything outside this set is ignored by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Dispatch,
    Heartbeat,
    Identify,
    Hello,
    HeartbeatAck,
}

impl Opcode {
    pub fn from_u8(op: u8) -> Option<Self> {
        match op {
            0 => Some(Opcode::Dispatch),
            1 => Some(Opcode::Heartbeat),
            2 => Some(Opcode::Identify),
            10 => Some(Opcode::Hello),
            11 => Some(Opcode::HeartbeatAck),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Opcode::Dispatch => 0,
            Opcode::Heartbeat => 1,
            Opcode::Identify => 2,
            Opcode::Hello => 10,
            Opcode::HeartbeatAck => 11,
        }
    }
}

/// Gateway frame envelope: `op` tag, optional sequence number, optional
/// event-type tag (Dispatch only), op-specific payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub op: u8,
    #[serde(rename = "s", skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
    #[serde(rename = "t", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(rename = "d", skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Frame {
    pub fn opcode(&self) -> Option<Opcode> {
        Opcode::from_u8(self.op)
    }

    pub fn identify(token: &str) -> Self {
        Frame {
            op: Opcode::Identify.as_u8(),
            seq: None,
            event_type: None,
            data: Some(json!({
                "token": token,
                "properties": {},
                "compress": false,
                "large_threshold": 250,
            })),
        }
    }

    /// Heartbeat carrying the last-seen sequence, or `null` before any
    /// Dispatch frame has been observed.
    pub fn heartbeat(seq: Option<u64>) -> Self {
        Frame {
            op: Opcode::Heartbeat.as_u8(),
            seq: None,
            event_type: None,
            data: Some(match seq {
                Some(n) => json!(n),
                None => Value::Null,
            }),
        }
    }
}

/// HELLO (op 10) payload.
#[derive(Debug, Deserialize)]
pub struct HelloData {
    pub heartbeat_interval: u64,
}

/// MESSAGE_CREATE dispatch payload, reduced to the fields the bot reads.
#[derive(Debug, Deserialize)]
pub struct MessageCreate {
    pub id: String,
    pub channel_id: String,
    pub content: String,
    pub author: MessageAuthor,
}

#[derive(Debug, Deserialize)]
pub struct MessageAuthor {
    pub id: String,
    pub username: String,
}
