//! Legal Clause Researcher - tool plugin for clause identification
//!
//! This library exposes the two entry points an orchestration host drives:
//! credential validation and tool invocation. The tool forwards free text to
//! an external legal analysis API and reshapes its answer into host messages.

pub mod config;
pub mod core;
pub mod error;
pub mod provider;
pub mod tools;
pub mod utils;

pub mod cli;

pub use config::Settings;
pub use error::{CredentialValidationError, ProviderError, ToolError};
pub use provider::credentials::Credentials;
pub use provider::LegalClauseResearcherProvider;
pub use tools::{Tool, ToolInvokeMessage};

// Re-export the analysis result types for hosts that consume the JSON message
pub use crate::core::legal_api::{ClauseFinding, LegalAnalysis};
