//! Tool System - The invocation surface the host drives per request
//!
//! Information Hiding:
//! - Request/response translation hidden behind the `Tool` trait
//! - Errors are converted into messages inside each tool, never returned
//! - Message delivery (channel, cancellation) hidden behind `MessageEmitter`

pub mod legal_clause;
pub mod messages;
pub mod registry;

use crate::provider::credentials::Credentials;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tokio::sync::mpsc;

pub use messages::{MessageEmitter, ToolInvokeMessage};

/// Buffer size of the channel used when collecting an invocation's messages
pub const MESSAGE_BUFFER: usize = 16;

/// Tool parameter schema definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub param_type: String,
    pub description: String,
    pub required: bool,
}

/// Tool metadata - describes what the tool does and how to use it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolMetadata {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
}

impl fmt::Display for ToolMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.description)
    }
}

impl fmt::Display for ToolParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let presence = if self.required { "required" } else { "optional" };
        write!(
            f,
            "{} <{}, {}> {}",
            self.name, self.param_type, presence, self.description
        )
    }
}

/// Tool trait - All tools must implement this
///
/// Information Hiding: Tool implementations hide their outbound calls and
/// error mapping behind this interface. An invocation always ends with at
/// least one message and never fails towards the host.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get tool metadata (name, description, parameters)
    fn metadata(&self) -> ToolMetadata;

    /// Run the tool, emitting messages on `tx` in order
    ///
    /// # Arguments
    /// * `params` - JSON object with the tool parameters
    /// * `credentials` - host-owned credentials, read only
    /// * `tx` - message sink; emission stops once the receiver is dropped
    async fn invoke(
        &self,
        params: Value,
        credentials: &Credentials,
        tx: mpsc::Sender<ToolInvokeMessage>,
    );
}

/// Run `tool` to completion and return its messages in emission order
pub async fn collect_messages(
    tool: &dyn Tool,
    params: Value,
    credentials: &Credentials,
) -> Vec<ToolInvokeMessage> {
    let (tx, mut rx) = mpsc::channel(MESSAGE_BUFFER);

    let produce = tool.invoke(params, credentials, tx);
    let consume = async {
        let mut messages = Vec::new();
        while let Some(message) = rx.recv().await {
            messages.push(message);
        }
        messages
    };

    let ((), messages) = tokio::join!(produce, consume);
    messages
}
