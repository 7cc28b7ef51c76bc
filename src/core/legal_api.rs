use crate::error::ToolError;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use std::time::Duration;

pub const ANALYSIS_TYPE: &str = "clause_identification";
pub const DEFAULT_SUMMARY: &str = "Legal analysis performed.";

#[derive(Debug, Serialize)]
pub struct AnalysisRequest<'a> {
    pub document_text: &'a str,
    pub analysis_type: &'static str,
    /// Serialized as `null` when the caller gave no keywords
    pub preferred_clauses: Option<&'a [String]>,
}

impl<'a> AnalysisRequest<'a> {
    pub fn clause_identification(text: &'a str, keywords: Option<&'a [String]>) -> Self {
        Self {
            document_text: text,
            analysis_type: ANALYSIS_TYPE,
            preferred_clauses: keywords,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnalysisResponse {
    identified_clauses: Option<IndexMap<String, Option<RawClause>>>,
    summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawClause {
    present: Option<bool>,
    matched_phrases: Option<Vec<String>>,
}

/// One clause category as reported back to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClauseFinding {
    pub present: bool,
    pub matched_phrases: Vec<String>,
}

/// Normalized analysis result with every default already applied.
/// Clauses keep the order the API reported them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalAnalysis {
    pub analysis_summary: String,
    pub identified_clauses: IndexMap<String, ClauseFinding>,
}

impl LegalAnalysis {
    pub fn is_empty(&self) -> bool {
        self.identified_clauses.is_empty()
    }
}

impl From<AnalysisResponse> for LegalAnalysis {
    fn from(response: AnalysisResponse) -> Self {
        let identified_clauses = response
            .identified_clauses
            .unwrap_or_default()
            .into_iter()
            .map(|(name, raw)| {
                let raw = raw.unwrap_or_default();
                let finding = ClauseFinding {
                    present: raw.present.unwrap_or(true),
                    matched_phrases: raw.matched_phrases.unwrap_or_default(),
                };
                (name, finding)
            })
            .collect();

        Self {
            analysis_summary: response
                .summary
                .unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
            identified_clauses,
        }
    }
}

/// Decode a 2xx response body into a normalized analysis
pub fn parse_analysis(body: &str) -> Result<LegalAnalysis, ToolError> {
    serde_json::from_str::<AnalysisResponse>(body)
        .map(LegalAnalysis::from)
        .map_err(|source| ToolError::ResponseParse {
            source,
            body: body.to_string(),
        })
}

/// Host part of the endpoint, safe to log; paths and query strings may carry tokens
fn endpoint_host(endpoint: &str) -> String {
    reqwest::Url::parse(endpoint)
        .ok()
        .and_then(|url| url.host_str().map(str::to_owned))
        .unwrap_or_else(|| "<invalid endpoint>".to_string())
}

/// Client for the external legal analysis endpoint.
///
/// Sends exactly one request per call. The call is not assumed idempotent,
/// so failures are returned to the caller instead of retried.
pub struct LegalAnalysisClient {
    client: Client,
    timeout: Duration,
}

impl LegalAnalysisClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }

    pub fn with_user_agent(timeout: Duration, user_agent: &str) -> Result<Self, ToolError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client, timeout })
    }

    pub async fn analyze(
        &self,
        endpoint: &str,
        api_key: &str,
        request: &AnalysisRequest<'_>,
    ) -> Result<LegalAnalysis, ToolError> {
        tracing::info!(
            "[LegalAnalysisClient] POST to {} (keywords: {})",
            endpoint_host(endpoint),
            request.preferred_clauses.map_or(0, |k| k.len())
        );

        let exchange = async {
            let response = self
                .client
                .post(endpoint)
                .header(AUTHORIZATION, format!("Bearer {}", api_key))
                .header(CONTENT_TYPE, "application/json")
                .header(ACCEPT, "application/json")
                .json(request)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(ToolError::HttpStatus {
                    status: status.as_u16(),
                    body,
                });
            }

            Ok::<_, ToolError>(response.text().await?)
        };

        let body = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result?,
            Err(_) => return Err(ToolError::Timeout(self.timeout)),
        };

        parse_analysis(&body)
    }
}
