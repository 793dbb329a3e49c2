//! SerpApi 搜索客户端

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::config::SearchConfig;
use crate::error::{AppError, Result};
use crate::oracle::{SearchLink, SearchOracle};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    answer_box: Option<AnswerBox>,
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnswerBox {
    answer: Option<String>,
    snippet: Option<String>,
    highlighted_words: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OrganicResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

impl SearchResponse {
    /// 答案框优先（answer > snippet > highlighted_words），其次第一条自然结果的摘要
    fn best_answer(self) -> Option<String> {
        if let Some(answer_box) = self.answer_box {
            if let Some(answer) = answer_box.answer {
                return Some(answer);
            }
            if let Some(snippet) = answer_box.snippet {
                return Some(snippet);
            }
            if let Some(words) = answer_box.highlighted_words {
                return Some(words.join(", "));
            }
        }

        self.organic_results
            .into_iter()
            .next()
            .and_then(|result| result.snippet)
            .filter(|snippet| !snippet.is_empty())
    }

    fn best_link(self) -> Option<SearchLink> {
        self.organic_results.into_iter().next().map(|result| {
            SearchLink::new(
                result.title.unwrap_or_else(|| "Link".to_string()),
                result.link.unwrap_or_else(|| "#".to_string()),
            )
        })
    }
}

pub struct SerpApiOracle {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine: String,
}

impl SerpApiOracle {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            engine: config.engine.clone(),
        })
    }

    async fn search(&self, query: &str) -> Result<SearchResponse> {
        if self.api_key.is_empty() {
            return Err(AppError::Config("SerpApi API key is not configured".to_string()));
        }

        debug!("Querying SerpApi: {}", query);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("api_key", self.api_key.as_str()),
                ("engine", self.engine.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Oracle(format!(
                "SerpApi returned {}: {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl SearchOracle for SerpApiOracle {
    async fn answer(&self, query: &str) -> Result<Option<String>> {
        Ok(self.search(query).await?.best_answer())
    }

    async fn link(&self, query: &str) -> Result<Option<SearchLink>> {
        Ok(self.search(query).await?.best_link())
    }
}
