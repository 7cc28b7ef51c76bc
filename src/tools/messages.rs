use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;

/// A single message handed back to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message", rename_all = "snake_case")]
pub enum ToolInvokeMessage {
    Text(String),
    Json(Value),
}

impl ToolInvokeMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn json(value: Value) -> Self {
        Self::Json(value)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

/// Ordered sender of tool messages.
///
/// Every `emit` reports whether the host is still listening; a `false`
/// means the invocation was cancelled and the tool should stop.
pub struct MessageEmitter {
    tx: mpsc::Sender<ToolInvokeMessage>,
}

impl MessageEmitter {
    pub fn new(tx: mpsc::Sender<ToolInvokeMessage>) -> Self {
        Self { tx }
    }

    pub async fn emit(&self, message: ToolInvokeMessage) -> bool {
        match self.tx.send(message).await {
            Ok(()) => true,
            Err(_) => {
                tracing::debug!("Message receiver dropped, stopping invocation");
                false
            }
        }
    }

    pub async fn text(&self, text: impl Into<String>) -> bool {
        self.emit(ToolInvokeMessage::text(text)).await
    }
}
