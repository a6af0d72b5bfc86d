// src/domain/candidate.rs
//
// One instructor record returned by the rating service search.
// Lives only for the duration of a single resolution.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub first_name: String,
    pub last_name: String,
    pub department: Option<String>,
    pub average_rating: Option<f64>,
    pub average_difficulty: Option<f64>,
    pub would_take_again_percent: Option<f64>,
    pub num_ratings: u32,

    /// Opaque upstream identifier used to build the profile link
    pub external_id: Option<String>,
}

impl CandidateRecord {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    pub fn with_num_ratings(mut self, num_ratings: u32) -> Self {
        self.num_ratings = num_ratings;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.average_rating = Some(rating);
        self
    }

    pub fn with_external_id(mut self, id: impl Into<String>) -> Self {
        self.external_id = Some(id.into());
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}
