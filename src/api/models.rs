use serde::{Deserialize, Serialize};

use crate::db::SummaryRecord;

/// What the `value` field of a summarize request holds.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Url,
    Text,
}

#[derive(Deserialize)]
pub struct SummarizeRequest {
    #[serde(rename = "type")]
    pub kind: InputKind,
    pub value: String,
    #[serde(default = "default_mode")]
    pub mode: String,
}

pub fn default_mode() -> String {
    "default".to_string()
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub article_text: String,
    pub summary: String,
    pub title: Option<String>,
}

#[derive(Deserialize)]
pub struct SaveSummaryRequest {
    pub content: String,
    pub keywords: Option<Vec<String>>,
    pub url: Option<String>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

#[derive(Serialize)]
pub struct ListSummariesResponse {
    pub items: Vec<SummaryRecord>,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}
