use async_trait::async_trait;

use crate::domain::CandidateRecord;
use crate::error::AppResult;

/// Search endpoint the resolver queries for candidate instructor records.
///
/// Implementations validate the wire format and return typed records; any
/// transport or protocol problem is an `Err`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Opaque institution identifier for `school_name`, if known
    async fn school_id(&self, school_name: &str) -> AppResult<Option<String>>;

    /// Free-text instructor search scoped to one institution
    async fn search_teachers(
        &self,
        school_id: &str,
        text: &str,
        page_size: u32,
    ) -> AppResult<Vec<CandidateRecord>>;
}
