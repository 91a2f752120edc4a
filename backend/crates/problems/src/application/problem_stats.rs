//! Count / Recent Use Cases
//!
//! Auxiliary reads for the dashboard.

use std::sync::Arc;

use crate::domain::entities::ProblemSummary;
use crate::domain::repository::ProblemRepository;
use crate::error::ProblemResult;

/// Number of entries in the recent view
pub const RECENT_LIMIT: u32 = 5;

/// Count problems use case
pub struct CountProblemsUseCase<R>
where
    R: ProblemRepository,
{
    repo: Arc<R>,
}

impl<R> CountProblemsUseCase<R>
where
    R: ProblemRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> ProblemResult<i64> {
        self.repo.count().await
    }
}

/// Recent problems use case
pub struct RecentProblemsUseCase<R>
where
    R: ProblemRepository,
{
    repo: Arc<R>,
}

impl<R> RecentProblemsUseCase<R>
where
    R: ProblemRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> ProblemResult<Vec<ProblemSummary>> {
        self.repo.recent(RECENT_LIMIT).await
    }
}
