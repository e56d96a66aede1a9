//! Protocol module - JSON message types for scripted sessions
//!
//! One message per line. Every message carries a `type` tag.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::core::{GameSnapshot, LockEvent};
use crate::types::{GameAction, PieceKind, SpinKind};

/// Most actions accepted in a single `action` message
pub const MAX_ACTIONS: usize = 32;

// ============== Script -> Engine Messages ==============

/// Action name in camelCase (`moveLeft`, `hardDrop`, ...), case-insensitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionName(pub GameAction);

impl<'de> Deserialize<'de> for ActionName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        GameAction::from_str(&s)
            .map(ActionName)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown action {s:?}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionList(pub ArrayVec<GameAction, MAX_ACTIONS>);

impl<'de> Deserialize<'de> for ActionList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;
        impl<'de> serde::de::Visitor<'de> for V {
            type Value = ActionList;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "an array of action strings")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut out = ArrayVec::<GameAction, MAX_ACTIONS>::new();
                while let Some(ActionName(a)) = seq.next_element::<ActionName>()? {
                    out.try_push(a)
                        .map_err(|_| serde::de::Error::custom("too many actions"))?;
                }
                Ok(ActionList(out))
            }
        }

        deserializer.deserialize_seq(V)
    }
}

/// Parsed incoming message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InboundMessage {
    /// Advance the clock
    Tick { ms: u32 },
    /// Apply commands in order
    Action { actions: ActionList },
    /// Request the current state
    Snapshot,
}

/// Parse a JSON message from a single line
pub fn parse_message(json: &str) -> Result<InboundMessage, serde_json::Error> {
    serde_json::from_str(json)
}

// ============== Engine -> Script Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_message")]
    InvalidMessage,
}

/// Full state view, emitted on request and once at end of input
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotMessage {
    /// Input line that produced this snapshot (0 for the final one)
    pub line: u64,
    #[serde(rename = "final")]
    pub is_final: bool,
    #[serde(flatten)]
    pub state: GameSnapshot,
}

/// A piece locked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockMessage {
    pub line: u64,
    pub kind: PieceKind,
    pub spin: SpinKind,
    pub rows: Vec<usize>,
    pub bonus: u32,
}

impl LockMessage {
    pub fn from_event(line: u64, event: LockEvent) -> Self {
        Self {
            line,
            kind: event.kind,
            spin: event.spin,
            rows: event.rows.to_vec(),
            bonus: event.bonus,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub line: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// Outgoing message
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundMessage {
    Snapshot(SnapshotMessage),
    Lock(LockMessage),
    Error(ErrorMessage),
}

/// Create an error message
pub fn create_error(line: u64, code: ErrorCode, message: &str) -> OutboundMessage {
    OutboundMessage::Error(ErrorMessage {
        line,
        code,
        message: message.to_string(),
    })
}
