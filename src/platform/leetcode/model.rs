use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::platform::{Difficulty, Submission};

pub const RECENT_AC_SUBMISSIONS_QUERY: &str = r#"
query recentAcSubmissions($username: String!, $limit: Int!) {
    recentAcSubmissionList(username: $username, limit: $limit) {
        title
        titleSlug
        status
        timestamp
    }
}
"#;

pub const SELECT_PROBLEM_QUERY: &str = r#"
query selectProblem($titleSlug: String!) {
    question(titleSlug: $titleSlug) {
        difficulty
    }
}
"#;

#[derive(Debug, Serialize)]
pub struct GraphQLRequest<'a> {
    pub query: &'static str,
    pub variables: Value,
    #[serde(rename = "operationName")]
    pub operation_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAcSubmissionsData {
    pub recent_ac_submission_list: Option<Vec<Submission>>,
}

#[derive(Debug, Deserialize)]
pub struct SelectProblemData {
    pub question: Option<QuestionDifficulty>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionDifficulty {
    pub difficulty: Option<Difficulty>,
}
