//! Legal Clause Identifier Tool
//!
//! Information Hiding:
//! - Parameter and credential checks happen before any network I/O
//! - The outbound request and its timeout live in `LegalAnalysisClient`
//! - Every failure is rendered as one text message; nothing escapes

use super::{MessageEmitter, Tool, ToolInvokeMessage, ToolMetadata, ToolParameter};
use crate::config::HttpConfig;
use crate::core::legal_api::{AnalysisRequest, LegalAnalysis, LegalAnalysisClient};
use crate::error::ToolError;
use crate::provider::credentials::{Credentials, API_ENDPOINT, API_KEY};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::mpsc;

pub const TOOL_NAME: &str = "legal_clause_identifier";

pub const PROGRESS_MESSAGE: &str = "Sending legal text to the legal analysis API for analysis...";
pub const COMPLETE_MESSAGE: &str = "Legal text analysis complete using the legal analysis API.";
pub const NO_CLAUSES_MESSAGE: &str = "The legal analysis API returned no identified legal clauses for the provided text. \
     The text might not contain common legal phrases or the API had no matches.";

/// Parameters of one invocation, checked and normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub text: String,
    /// `None` lets the API fall back to its default clause detection; an
    /// explicit list, even an empty one, is forwarded as given
    pub keywords: Option<Vec<String>>,
}

impl InvocationRequest {
    pub fn from_params(params: &Value) -> Result<Self, ToolError> {
        let text = match params.get("text") {
            None | Some(Value::Null) => return Err(ToolError::MissingParameter("text")),
            Some(Value::String(text)) if text.trim().is_empty() => {
                return Err(ToolError::MissingParameter("text"))
            }
            Some(Value::String(text)) => text.clone(),
            Some(other) => {
                return Err(ToolError::InvalidParameter {
                    name: "text",
                    reason: format!("expected a string, got {}", json_kind(other)),
                })
            }
        };

        let keywords: Option<Vec<String>> = match params.get("keywords") {
            None | Some(Value::Null) => None,
            // form inputs arrive as a single comma-separated string, blank when left empty
            Some(Value::String(list)) if list.trim().is_empty() => None,
            Some(Value::String(list)) => Some(
                list.split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(String::from)
                    .collect(),
            ),
            Some(Value::Array(items)) => {
                let mut keywords = Vec::with_capacity(items.len());
                for item in items {
                    let keyword = item.as_str().ok_or_else(|| ToolError::InvalidParameter {
                        name: "keywords",
                        reason: format!("expected strings, found {}", json_kind(item)),
                    })?;
                    let keyword = keyword.trim();
                    if !keyword.is_empty() {
                        keywords.push(keyword.to_string());
                    }
                }
                Some(keywords)
            }
            Some(other) => {
                return Err(ToolError::InvalidParameter {
                    name: "keywords",
                    reason: format!(
                        "expected a list or comma-separated string, got {}",
                        json_kind(other)
                    ),
                })
            }
        };

        Ok(Self { text, keywords })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Returns `(api_key, api_endpoint)`, key checked first
fn api_credentials(credentials: &Credentials) -> Result<(&str, &str), ToolError> {
    let api_key = credentials
        .require(API_KEY)
        .ok_or(ToolError::MissingCredential {
            key: API_KEY,
            label: "key",
        })?;
    let endpoint = credentials
        .require(API_ENDPOINT)
        .ok_or(ToolError::MissingCredential {
            key: API_ENDPOINT,
            label: "endpoint",
        })?;
    Ok((api_key, endpoint))
}

/// Map the outcome of the API call to the messages the host receives
pub fn render_outcome(outcome: Result<LegalAnalysis, ToolError>) -> Vec<ToolInvokeMessage> {
    match outcome {
        Ok(analysis) if analysis.is_empty() => vec![ToolInvokeMessage::text(NO_CLAUSES_MESSAGE)],
        Ok(analysis) => match serde_json::to_value(&analysis) {
            Ok(result) => vec![
                ToolInvokeMessage::json(json!({ "legal_analysis": result })),
                ToolInvokeMessage::text(COMPLETE_MESSAGE),
            ],
            Err(e) => vec![ToolInvokeMessage::text(
                ToolError::Unexpected(e.to_string()).to_string(),
            )],
        },
        Err(e) => vec![ToolInvokeMessage::text(e.to_string())],
    }
}

/// Identifies legal clauses in free text through the external analysis API
pub struct LegalClauseTool {
    client: LegalAnalysisClient,
}

impl LegalClauseTool {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: LegalAnalysisClient::new(timeout),
        }
    }

    pub fn from_config(http: &HttpConfig) -> Result<Self, ToolError> {
        let client = LegalAnalysisClient::with_user_agent(http.timeout(), &http.user_agent)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Tool for LegalClauseTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: TOOL_NAME.to_string(),
            description: "Identify legal clauses (confidentiality, indemnification, termination, \
                          ...) in a piece of legal text."
                .to_string(),
            parameters: vec![
                ToolParameter {
                    name: "text".to_string(),
                    param_type: "string".to_string(),
                    description: "The legal text to analyze".to_string(),
                    required: true,
                },
                ToolParameter {
                    name: "keywords".to_string(),
                    param_type: "array".to_string(),
                    description: "Clause types to look for, as a list or comma-separated string. \
                                  The API uses its default detection when omitted"
                        .to_string(),
                    required: false,
                },
            ],
        }
    }

    async fn invoke(
        &self,
        params: Value,
        credentials: &Credentials,
        tx: mpsc::Sender<ToolInvokeMessage>,
    ) {
        let out = MessageEmitter::new(tx);

        let request = match InvocationRequest::from_params(&params) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("[LegalClauseTool] Rejected parameters: {}", e);
                out.text(e.to_string()).await;
                return;
            }
        };

        let (api_key, endpoint) = match api_credentials(credentials) {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!("[LegalClauseTool] {}", e);
                out.text(e.to_string()).await;
                return;
            }
        };

        if !out.text(PROGRESS_MESSAGE).await {
            return;
        }

        let payload =
            AnalysisRequest::clause_identification(&request.text, request.keywords.as_deref());
        let outcome = self.client.analyze(endpoint, api_key, &payload).await;

        match &outcome {
            Ok(analysis) => tracing::info!(
                "[LegalClauseTool] Analysis returned {} clause(s)",
                analysis.identified_clauses.len()
            ),
            Err(e) => tracing::warn!("[LegalClauseTool] Analysis failed: {}", e),
        }

        for message in render_outcome(outcome) {
            if !out.emit(message).await {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::collect_messages;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials_for(server: &MockServer) -> Credentials {
        Credentials::new()
            .with(API_KEY, "test-key")
            .with(API_ENDPOINT, format!("{}/v1/analyze", server.uri()))
    }

    #[test]
    fn test_params_require_text() {
        for params in [json!({}), json!({"text": null}), json!({"text": "  "}), json!("loose")] {
            let err = InvocationRequest::from_params(&params).unwrap_err();
            assert!(matches!(err, ToolError::MissingParameter("text")), "{}", params);
        }

        let err = InvocationRequest::from_params(&json!({"text": 7})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameter { name: "text", .. }));
    }

    #[test]
    fn test_params_keywords_forms() {
        let request = InvocationRequest::from_params(&json!({
            "text": "clause",
            "keywords": ["confidentiality", " ", " termination "]
        }))
        .unwrap();
        assert_eq!(
            request.keywords,
            Some(vec!["confidentiality".to_string(), "termination".to_string()])
        );

        let request =
            InvocationRequest::from_params(&json!({"text": "clause", "keywords": "a, b,,"}))
                .unwrap();
        assert_eq!(request.keywords, Some(vec!["a".to_string(), "b".to_string()]));

        let request =
            InvocationRequest::from_params(&json!({"text": "clause", "keywords": []})).unwrap();
        assert_eq!(request.keywords, Some(Vec::new()));

        for absent in [json!({"text": "clause"}), json!({"text": "clause", "keywords": " "})] {
            let request = InvocationRequest::from_params(&absent).unwrap();
            assert_eq!(request.keywords, None);
        }

        let err = InvocationRequest::from_params(&json!({"text": "clause", "keywords": [1]}))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameter { name: "keywords", .. }));
    }

    #[test]
    fn test_render_outcome_variants() {
        let empty = LegalAnalysis {
            analysis_summary: "done".to_string(),
            identified_clauses: Default::default(),
        };
        assert_eq!(
            render_outcome(Ok(empty)),
            vec![ToolInvokeMessage::text(NO_CLAUSES_MESSAGE)]
        );

        let failed = render_outcome(Err(ToolError::HttpStatus {
            status: 401,
            body: "bad token".to_string(),
        }));
        assert_eq!(failed.len(), 1);
        assert!(failed[0].as_text().unwrap().contains("401 - bad token"));
    }

    #[test]
    fn test_metadata() {
        let tool = LegalClauseTool::new(Duration::from_secs(5));
        let metadata = tool.metadata();

        assert_eq!(metadata.name, TOOL_NAME);
        assert!(metadata.parameters[0].required);
        assert!(!metadata.parameters[1].required);
    }

    #[tokio::test]
    async fn test_sends_documented_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/analyze"))
            .and(header("authorization", "Bearer test-key"))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .and(body_json(json!({
                "document_text": "The Recipient shall keep secret all information.",
                "analysis_type": "clause_identification",
                "preferred_clauses": ["confidentiality"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "summary": "One clause found",
                "identified_clauses": {
                    "confidentiality": {"matched_phrases": ["shall keep secret"]}
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tool = LegalClauseTool::new(Duration::from_secs(5));
        let messages = collect_messages(
            &tool,
            json!({
                "text": "The Recipient shall keep secret all information.",
                "keywords": ["confidentiality"]
            }),
            &credentials_for(&mock_server),
        )
        .await;

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].as_text(), Some(PROGRESS_MESSAGE));
        let analysis = &messages[1].as_json().unwrap()["legal_analysis"];
        assert_eq!(
            analysis["identified_clauses"]["confidentiality"],
            json!({"present": true, "matched_phrases": ["shall keep secret"]})
        );
        assert_eq!(messages[2].as_text(), Some(COMPLETE_MESSAGE));
    }

    #[tokio::test]
    async fn test_missing_endpoint_makes_no_request() {
        let mock_server = MockServer::start().await;
        let tool = LegalClauseTool::new(Duration::from_secs(5));
        let credentials = Credentials::new().with(API_KEY, "test-key");

        let messages = collect_messages(&tool, json!({"text": "clause"}), &credentials).await;

        assert_eq!(messages.len(), 1);
        assert!(messages[0].as_text().unwrap().contains("'api_endpoint'"));
        let received = mock_server.received_requests().await.unwrap();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_keywords_make_no_request() {
        let mock_server = MockServer::start().await;
        let tool = LegalClauseTool::new(Duration::from_secs(5));

        let messages = collect_messages(
            &tool,
            json!({"text": "clause", "keywords": {"confidentiality": true}}),
            &credentials_for(&mock_server),
        )
        .await;

        assert_eq!(messages.len(), 1);
        assert!(messages[0]
            .as_text()
            .unwrap()
            .starts_with("Error: Invalid parameter 'keywords'"));
        let received = mock_server.received_requests().await.unwrap();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn test_explicit_empty_keywords_are_forwarded() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({
                "document_text": "clause",
                "analysis_type": "clause_identification",
                "preferred_clauses": []
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"identified_clauses": {}})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let tool = LegalClauseTool::new(Duration::from_secs(5));
        let messages = collect_messages(
            &tool,
            json!({"text": "clause", "keywords": []}),
            &credentials_for(&mock_server),
        )
        .await;

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].as_text(), Some(NO_CLAUSES_MESSAGE));
    }

    #[tokio::test]
    async fn test_malformed_body_is_reported() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not-json"))
            .mount(&mock_server)
            .await;

        let tool = LegalClauseTool::new(Duration::from_secs(5));
        let credentials = credentials_for(&mock_server);
        let messages = collect_messages(&tool, json!({"text": "clause"}), &credentials).await;

        assert_eq!(messages.len(), 2);
        let error = messages[1].as_text().unwrap();
        assert!(error.starts_with("Error parsing legal analysis API response"));
        assert!(error.contains("not-json"));
    }

    #[tokio::test]
    async fn test_stops_when_receiver_dropped() {
        let mock_server = MockServer::start().await;
        let tool = LegalClauseTool::new(Duration::from_secs(5));
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        tool.invoke(json!({"text": "clause"}), &credentials_for(&mock_server), tx)
            .await;

        let received = mock_server.received_requests().await.unwrap();
        assert!(received.is_empty());
    }
}
