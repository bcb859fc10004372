//! OpenAI-compatible chat endpoint as an [`IQueryEnhancer`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use vantage_core::errors::{RetrievalError, VantageError, VantageResult};
use vantage_core::models::QueryAnalysis;
use vantage_core::traits::{AnalysisRefinement, IQueryEnhancer};

const SYSTEM_PROMPT: &str = "You classify questions about AI companies and investments. \
Reply with one JSON object with keys intent (factual, comparison, trend, relationship, \
investment, general), entities (array of strings), complexity (0-1), specificity (0-1).";

pub struct HttpQueryEnhancer {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: String,
}

fn failed(reason: impl Into<String>) -> VantageError {
    RetrievalError::EnhancementFailed {
        reason: reason.into(),
    }
    .into()
}

impl HttpQueryEnhancer {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> VantageResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VantageError::configuration("query_enhancer", e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
        })
    }
}

#[async_trait]
impl IQueryEnhancer for HttpQueryEnhancer {
    async fn refine(
        &self,
        query: &str,
        heuristic: &QueryAnalysis,
    ) -> VantageResult<AnalysisRefinement> {
        let prompt = format!(
            "Question: {query}\nHeuristic guess: {}",
            serde_json::to_string(heuristic)?
        );
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.0,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await.map_err(|e| failed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(failed(format!("status {}", response.status())));
        }
        let parsed: ChatResponse = response.json().await.map_err(|e| failed(e.to_string()))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| failed("empty choices"))?;

        debug!(chars = content.len(), "enhancer reply received");
        AnalysisRefinement::parse(&content).ok_or_else(|| failed("reply has no JSON object"))
    }

    fn name(&self) -> &str {
        &self.model
    }
}
