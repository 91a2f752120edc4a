//! List Problems Use Case

use std::sync::Arc;

use crate::domain::entities::Problem;
use crate::domain::repository::ProblemRepository;
use crate::domain::value_objects::ProblemQuery;
use crate::error::ProblemResult;

/// List problems use case
pub struct ListProblemsUseCase<R>
where
    R: ProblemRepository,
{
    repo: Arc<R>,
}

impl<R> ListProblemsUseCase<R>
where
    R: ProblemRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, query: ProblemQuery) -> ProblemResult<Vec<Problem>> {
        let problems = self.repo.list(&query).await?;

        tracing::debug!(
            count = problems.len(),
            sort_key = ?query.sort_key,
            sort_order = ?query.sort_order,
            "Listed problems"
        );

        Ok(problems)
    }
}
