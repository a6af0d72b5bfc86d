// src/application/dto/mod.rs
//
// Messaging-boundary shapes
//
// PRINCIPLES:
// - Plain serializable structs, camelCase on the wire
// - Conversion FROM domain results only
// - Every failure category collapses to {ok: false, error}

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{ParsedIdentity, ResolutionResult};
use crate::error::AppResult;

const FALLBACK_SEARCH_URL: &str = "https://www.google.com/search";

// ============================================================================
// REQUEST
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequest {
    #[serde(alias = "prof")]
    pub identity: ParsedIdentity,

    #[serde(default)]
    pub school_name: Option<String>,
}

impl RatingRequest {
    pub fn new(identity: ParsedIdentity) -> Self {
        Self {
            identity,
            school_name: None,
        }
    }
}

// ============================================================================
// RESPONSE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatingResponse {
    Found(RatingFoundDto),
    Unavailable(RatingUnavailableDto),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingFoundDto {
    pub ok: bool,
    pub rating: f64,
    pub difficulty: Option<f64>,
    pub would_take_again: Option<f64>,
    pub num_ratings: u32,
    pub department: Option<String>,
    pub profile_url: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingUnavailableDto {
    pub ok: bool,
    pub error: String,
}

impl RatingResponse {
    pub fn is_ok(&self) -> bool {
        match self {
            RatingResponse::Found(found) => found.ok,
            RatingResponse::Unavailable(_) => false,
        }
    }
}

impl From<ResolutionResult> for RatingResponse {
    fn from(result: ResolutionResult) -> Self {
        match result {
            ResolutionResult::Matched(summary) => RatingResponse::Found(RatingFoundDto {
                ok: true,
                rating: summary.rating,
                difficulty: summary.difficulty,
                would_take_again: summary.would_take_again,
                num_ratings: summary.num_ratings,
                department: summary.department,
                profile_url: summary.profile_url,
                first_name: summary.first_name,
                last_name: summary.last_name,
            }),
            ResolutionResult::Unavailable(failure) => {
                RatingResponse::Unavailable(RatingUnavailableDto {
                    ok: false,
                    error: failure.description,
                })
            }
        }
    }
}

/// Search link offered when no rating is available
pub fn fallback_search_url(display: &str, school_name: &str) -> AppResult<Url> {
    let text = format!("{} Rate My Professor {}", display, school_name);
    Ok(Url::parse_with_params(FALLBACK_SEARCH_URL, &[("q", text)])?)
}
