use serde_json::Value;

use crate::types::{Command, Direction};

#[derive(Debug, PartialEq)]
pub enum ParsedClientMessage {
    Input { dir: Direction },
    Pause,
    Confirm,
    Ping { t: f64 },
}

impl ParsedClientMessage {
    /// Game command carried by the message; pings are answered by the adapter.
    pub fn command(&self) -> Option<Command> {
        match self {
            Self::Input { dir } => Some(Command::Turn(*dir)),
            Self::Pause => Some(Command::Pause),
            Self::Confirm => Some(Command::Confirm),
            Self::Ping { .. } => None,
        }
    }
}

pub fn parse_client_message(raw: &str) -> Option<ParsedClientMessage> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let object = value.as_object()?;
    let message_type = object.get("type")?.as_str()?;

    match message_type {
        "input" => {
            let dir = Direction::parse_move(object.get("dir")?.as_str()?)?;
            Some(ParsedClientMessage::Input { dir })
        }
        "pause" => Some(ParsedClientMessage::Pause),
        "confirm" => Some(ParsedClientMessage::Confirm),
        "ping" => {
            let t = object.get("t")?.as_f64()?;
            if !t.is_finite() {
                return None;
            }
            Some(ParsedClientMessage::Ping { t })
        }
        _ => None,
    }
}
