//! Plugin Provider - the entry points the host calls
//!
//! Information Hiding:
//! - Credential rules hidden behind `validate_credentials`
//! - Tool lookup and message collection hidden behind `invoke`

pub mod credentials;

use crate::config::Settings;
use crate::error::{CredentialValidationError, ProviderError, ToolError};
use crate::tools::registry::ToolRegistry;
use crate::tools::{collect_messages, Tool, ToolInvokeMessage};
use credentials::{Credentials, API_KEY};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Provider exposing the legal clause tools to the host
pub struct LegalClauseResearcherProvider {
    registry: ToolRegistry,
}

impl LegalClauseResearcherProvider {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ToolError> {
        Ok(Self::new(ToolRegistry::with_defaults(&settings.http)?))
    }

    /// Called by the host when an operator saves credentials.
    ///
    /// Only the API key is checked; the endpoint is reported at invocation
    /// time if missing.
    pub fn validate_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<(), CredentialValidationError> {
        if credentials.require(API_KEY).is_none() {
            tracing::warn!("Credential validation failed: '{}' is missing", API_KEY);
            return Err(CredentialValidationError(format!(
                "Missing required credential: '{}'.",
                API_KEY
            )));
        }
        Ok(())
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn tool(&self, name: &str) -> Result<Arc<dyn Tool>, ProviderError> {
        self.registry
            .get(name)
            .ok_or_else(|| ProviderError::UnknownTool(name.to_string()))
    }

    /// Invoke a tool and collect all of its messages in order
    pub async fn invoke(
        &self,
        tool_name: &str,
        params: Value,
        credentials: &Credentials,
    ) -> Result<Vec<ToolInvokeMessage>, ProviderError> {
        let tool = self.tool(tool_name)?;
        Ok(collect_messages(tool.as_ref(), params, credentials).await)
    }

    /// Invoke a tool, forwarding each message to `tx` as soon as it is produced
    pub async fn invoke_streaming(
        &self,
        tool_name: &str,
        params: Value,
        credentials: &Credentials,
        tx: mpsc::Sender<ToolInvokeMessage>,
    ) -> Result<(), ProviderError> {
        let tool = self.tool(tool_name)?;
        tool.invoke(params, credentials, tx).await;
        Ok(())
    }
}
