//! Tool Registry
//!
//! Information Hiding:
//! - Tool storage and lookup implementation hidden
//! - Construction of the plugin's tools from settings hidden

use super::legal_clause::LegalClauseTool;
use super::Tool;
use crate::config::HttpConfig;
use crate::error::ToolError;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry of the tools this plugin exposes to the host
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a new tool
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.metadata().name;
        tracing::info!("Registering tool: {}", name);
        self.tools.insert(name, tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// One block per tool: its summary line, then one indented line per parameter
    pub fn tools_description(&self) -> String {
        self.tools
            .values()
            .map(|tool| {
                let metadata = tool.metadata();
                let mut block = metadata.to_string();
                for param in &metadata.parameters {
                    block.push_str("\n    ");
                    block.push_str(&param.to_string());
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Registry holding every tool of the plugin
    pub fn with_defaults(http: &HttpConfig) -> Result<Self, ToolError> {
        let mut registry = Self::new();
        registry.register(Arc::new(LegalClauseTool::from_config(http)?));
        Ok(registry)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::legal_clause::TOOL_NAME;
    use std::time::Duration;

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(LegalClauseTool::new(Duration::from_secs(5))));

        let tool = registry.get(TOOL_NAME).unwrap();
        assert_eq!(tool.metadata().name, TOOL_NAME);
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = ToolRegistry::with_defaults(&HttpConfig::default()).unwrap();
        assert!(registry.get(TOOL_NAME).is_some());
    }

    #[test]
    fn test_tools_description_lists_parameter_schema() {
        let registry = ToolRegistry::with_defaults(&HttpConfig::default()).unwrap();
        let description = registry.tools_description();
        let lines: Vec<&str> = description.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("legal_clause_identifier: Identify legal clauses"));
        assert!(lines[1].starts_with("    text <string, required> The legal text"));
        assert!(lines[2].starts_with("    keywords <array, optional> Clause types"));
    }

    #[test]
    fn test_empty_registry_has_empty_description() {
        assert_eq!(ToolRegistry::new().tools_description(), "");
    }
}
