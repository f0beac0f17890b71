mod error;
pub mod model;

use std::time::Duration;

use async_trait::async_trait;
use model::{
    GraphQLRequest, GraphQLResponse, RecentAcSubmissionsData, SelectProblemData, RECENT_AC_SUBMISSIONS_QUERY,
    SELECT_PROBLEM_QUERY,
};
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client,
};
use serde::de::DeserializeOwned;
use url::Url;

pub use error::*;

use crate::config::JudgeConfig;

use super::{Difficulty, JudgeApi, PlatformError, Submission};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; LeetStashBot/1.0)";

pub struct LeetCodeClient {
    client: Client,
    graphql_url: Url,
}

impl LeetCodeClient {
    pub fn new(config: &JudgeConfig) -> Result<Self, LeetCodeError> {
        info!("Initializing LeetCode client for {}", config.graphql_url);
        let client = Self::create_client(&config.graphql_url, Duration::from_secs(config.request_timeout_secs))?;

        Ok(Self {
            client,
            graphql_url: config.graphql_url.clone(),
        })
    }

    fn create_client(graphql_url: &Url, timeout: Duration) -> Result<Client, LeetCodeError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let origin = graphql_url.origin().ascii_serialization();
        if let Ok(referer) = HeaderValue::from_str(&format!("{}/", origin)) {
            headers.insert(header::REFERER, referer);
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(60))
            .default_headers(headers)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;

        Ok(client)
    }

    async fn post_query<T: DeserializeOwned>(&self, request: &GraphQLRequest<'_>) -> Result<Option<T>, LeetCodeError> {
        let response = self.client.post(self.graphql_url.clone()).json(request).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LeetCodeError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        parse_response(&body)
    }
}

/// Decodes a GraphQL envelope. Any top-level `errors` entry fails the whole
/// query, even when partial data came along with it.
pub fn parse_response<T: DeserializeOwned>(body: &str) -> Result<Option<T>, LeetCodeError> {
    let response: GraphQLResponse<T> = serde_json::from_str(body)
        .map_err(|e| LeetCodeError::DeserializationError(format!("Failed to parse JSON: {}, Response: {}", e, body)))?;

    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        let messages = errors.into_iter().map(|e| e.message).collect::<Vec<_>>().join("; ");
        return Err(LeetCodeError::QueryError(messages));
    }

    Ok(response.data)
}

#[async_trait]
impl JudgeApi for LeetCodeClient {
    fn platform_name(&self) -> &str {
        "LeetCode"
    }

    async fn fetch_recent_submissions(
        &self,
        handle: &str,
        limit: usize,
    ) -> Result<Option<Vec<Submission>>, PlatformError> {
        info!("Fetching recent accepted submissions for {}", handle);

        let request = GraphQLRequest {
            query: RECENT_AC_SUBMISSIONS_QUERY,
            variables: serde_json::json!({
                "username": handle,
                "limit": limit,
            }),
            operation_name: "recentAcSubmissions",
        };

        match self.post_query::<RecentAcSubmissionsData>(&request).await {
            Ok(data) => {
                let submissions = data.and_then(|d| d.recent_ac_submission_list);
                debug!(
                    "Submissions received for {}: {}",
                    handle,
                    submissions.as_ref().map_or(0, |s| s.len())
                );
                Ok(submissions)
            }
            Err(e) => {
                error!("Error fetching submissions for {}: {}", handle, e);
                Err(e.into())
            }
        }
    }

    async fn fetch_difficulty(&self, title_slug: &str) -> Result<Option<Difficulty>, PlatformError> {
        debug!("Fetching difficulty for problem {}", title_slug);

        let request = GraphQLRequest {
            query: SELECT_PROBLEM_QUERY,
            variables: serde_json::json!({
                "titleSlug": title_slug,
            }),
            operation_name: "selectProblem",
        };

        match self.post_query::<SelectProblemData>(&request).await {
            Ok(data) => Ok(data.and_then(|d| d.question).and_then(|q| q.difficulty)),
            Err(e) => {
                error!("Error fetching difficulty for {}: {}", title_slug, e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_client_from_config() {
        let config = AppConfig::new_test_config();
        let client = LeetCodeClient::new(&config.judge).unwrap();

        assert_eq!(client.platform_name(), "LeetCode");
        assert_eq!(client.graphql_url.as_str(), "http://127.0.0.1:9/graphql");
    }

    #[test]
    fn test_parse_empty_errors_list() {
        let body = r#"{"data": {"recentAcSubmissionList": null}, "errors": []}"#;

        let data = parse_response::<RecentAcSubmissionsData>(body).unwrap().unwrap();
        assert!(data.recent_ac_submission_list.is_none());
    }

    #[test]
    fn test_parse_recent_submissions() {
        let body = r#"{
            "data": {
                "recentAcSubmissionList": [
                    {"title": "Two Sum", "titleSlug": "two-sum", "status": "10", "timestamp": "1700000100"},
                    {"title": "LRU Cache", "titleSlug": "lru-cache", "status": "10", "timestamp": "1700000000"}
                ]
            }
        }"#;

        let data = parse_response::<RecentAcSubmissionsData>(body).unwrap().unwrap();
        let submissions = data.recent_ac_submission_list.unwrap();

        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].title_slug, "two-sum");
        assert_eq!(submissions[0].timestamp, 1_700_000_100);
        assert_eq!(submissions[1].title, "LRU Cache");
    }

    #[test]
    fn test_parse_empty_submission_list() {
        let body = r#"{"data": {"recentAcSubmissionList": []}}"#;

        let data = parse_response::<RecentAcSubmissionsData>(body).unwrap().unwrap();
        assert_eq!(data.recent_ac_submission_list, Some(vec![]));
    }

    #[test]
    fn test_parse_top_level_errors() {
        let body = r#"{
            "errors": [{"message": "That user does not exist.", "locations": [{"line": 2, "column": 3}]}],
            "data": {"recentAcSubmissionList": null}
        }"#;

        let result = parse_response::<RecentAcSubmissionsData>(body);
        assert!(matches!(result, Err(LeetCodeError::QueryError(ref msg)) if msg == "That user does not exist."));
    }

    #[test]
    fn test_parse_malformed_body() {
        let result = parse_response::<RecentAcSubmissionsData>("<html>Service Unavailable</html>");
        assert!(matches!(result, Err(LeetCodeError::DeserializationError(_))));
    }

    #[test]
    fn test_parse_difficulty() {
        let body = r#"{"data": {"question": {"difficulty": "Medium"}}}"#;

        let data = parse_response::<SelectProblemData>(body).unwrap().unwrap();
        assert_eq!(data.question.unwrap().difficulty, Some(Difficulty::Medium));
    }

    #[test]
    fn test_parse_missing_question() {
        let body = r#"{"data": {"question": null}}"#;

        let data = parse_response::<SelectProblemData>(body).unwrap().unwrap();
        assert!(data.question.is_none());
    }
}
