// src/integrations/rmp/client.rs
//
// RateMyProfessors GraphQL client
//
// ARCHITECTURE:
// - Speaks the public GraphQL endpoint used by the RMP web site
// - Maps wire records → CandidateRecord (no scoring here)
// - All HTTP / GraphQL / decode problems surface as AppError
//
// RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - The institution id is fixed; lookup by name is a stub

use async_trait::async_trait;
use base64::Engine;
use log::{debug, warn};
use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

use super::source::CandidateSource;
use crate::domain::CandidateRecord;
use crate::error::{AppError, AppResult};

pub const DEFAULT_ENDPOINT: &str = "https://www.ratemyprofessors.com/graphql";
pub const PROFILE_BASE_URL: &str = "https://www.ratemyprofessors.com/professor/";

/// UC Davis: https://www.ratemyprofessors.com/school/1073
pub const DEFAULT_SCHOOL_LEGACY_ID: u32 = 1073;
pub const DEFAULT_SCHOOL_NAME: &str = "University of California Davis";

const ERROR_BODY_LIMIT: usize = 200;

const TEACHER_SEARCH_QUERY: &str = r#"
    query TeacherSearch($q: TeacherSearchQuery!, $first: Int) {
      newSearch {
        teachers(query: $q, first: $first) {
          edges {
            node {
              id
              legacyId
              firstName
              lastName
              department
              avgRating
              avgDifficulty
              numRatings
              wouldTakeAgainPercent
              school { id name }
            }
          }
        }
      }
    }
"#;

/// Relay-style id the search API expects: base64("School-<legacy id>")
pub fn school_relay_id(legacy_id: u32) -> String {
    base64::engine::general_purpose::STANDARD.encode(format!("School-{}", legacy_id))
}

/// Public profile page for an upstream legacy id
pub fn profile_url(external_id: &str) -> String {
    format!("{}{}", PROFILE_BASE_URL, external_id)
}

// ============================================================================
// WIRE TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeacherSearchData {
    new_search: Option<NewSearchData>,
}

#[derive(Debug, Deserialize)]
struct NewSearchData {
    teachers: Option<TeacherConnection>,
}

#[derive(Debug, Deserialize)]
struct TeacherConnection {
    #[serde(default)]
    edges: Vec<TeacherEdge>,
}

#[derive(Debug, Deserialize)]
struct TeacherEdge {
    node: Option<TeacherNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeacherNode {
    legacy_id: Option<i64>,
    first_name: Option<String>,
    last_name: Option<String>,
    department: Option<String>,
    avg_rating: Option<f64>,
    avg_difficulty: Option<f64>,
    num_ratings: Option<i64>,
    would_take_again_percent: Option<f64>,
    school: Option<SchoolData>,
}

#[derive(Debug, Deserialize)]
struct SchoolData {
    #[allow(dead_code)] // selected for parity with the site's own query
    id: Option<String>,
    name: Option<String>,
}

// ============================================================================
// CLIENT
// ============================================================================

#[derive(Debug, Clone)]
pub struct RmpClientConfig {
    pub endpoint: String,
    pub school_legacy_id: u32,
    pub timeout: Duration,
}

impl Default for RmpClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            school_legacy_id: DEFAULT_SCHOOL_LEGACY_ID,
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct RmpClient {
    endpoint: Url,
    http_client: Client,
    school_legacy_id: u32,
}

impl RmpClient {
    pub fn new(config: &RmpClientConfig) -> AppResult<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            endpoint,
            http_client,
            school_legacy_id: config.school_legacy_id,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    // ========================================================================
    // INTERNAL: GraphQL Execution
    // ========================================================================

    async fn execute_query<T>(&self, query: &str, variables: serde_json::Value) -> AppResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let body = json!({
            "query": query,
            "variables": variables
        });

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("RMP GraphQL returned HTTP {}", status);
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                body: truncate(&text, ERROR_BODY_LIMIT),
            });
        }

        let text = response.text().await?;
        decode_graphql(&text)
    }
}

#[async_trait]
impl CandidateSource for RmpClient {
    async fn school_id(&self, school_name: &str) -> AppResult<Option<String>> {
        debug!(
            "Using fixed school {} for '{}'",
            self.school_legacy_id, school_name
        );
        Ok(Some(school_relay_id(self.school_legacy_id)))
    }

    async fn search_teachers(
        &self,
        school_id: &str,
        text: &str,
        page_size: u32,
    ) -> AppResult<Vec<CandidateRecord>> {
        let variables = json!({
            "q": {
                "text": text,
                "schoolID": school_id,
                "fallback": false
            },
            "first": page_size
        });

        let data: TeacherSearchData = self.execute_query(TEACHER_SEARCH_QUERY, variables).await?;
        let candidates = map_search_data(data);
        debug!("RMP search '{}' returned {} candidates", text, candidates.len());
        Ok(candidates)
    }
}

/// Decode a GraphQL envelope, turning `errors` into `AppError::GraphQl`.
fn decode_graphql<T>(body: &str) -> AppResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    let envelope: GraphQLResponse<T> = serde_json::from_str(body)?;

    if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        return Err(AppError::GraphQl(messages.join(", ")));
    }

    envelope
        .data
        .ok_or_else(|| AppError::GraphQl("response carried no data".to_string()))
}

fn map_search_data(data: TeacherSearchData) -> Vec<CandidateRecord> {
    data.new_search
        .and_then(|s| s.teachers)
        .map(|t| t.edges)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|edge| edge.node)
        .map(map_teacher_node)
        .collect()
}

fn map_teacher_node(node: TeacherNode) -> CandidateRecord {
    if let Some(school) = node.school.as_ref().and_then(|s| s.name.as_deref()) {
        debug!("candidate school: {}", school);
    }

    CandidateRecord {
        first_name: node.first_name.unwrap_or_default(),
        last_name: node.last_name.unwrap_or_default(),
        department: node.department,
        average_rating: node.avg_rating,
        average_difficulty: node.avg_difficulty,
        would_take_again_percent: node.would_take_again_percent,
        num_ratings: node
            .num_ratings
            .map(|n| u32::try_from(n.max(0)).unwrap_or(u32::MAX))
            .unwrap_or(0),
        external_id: node.legacy_id.map(|id| id.to_string()),
    }
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
