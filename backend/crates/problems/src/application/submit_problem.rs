//! Submit Problem Use Case
//!
//! Public entry point: validates a submission and stores it.

use std::sync::Arc;

use crate::domain::entities::Problem;
use crate::domain::repository::ProblemRepository;
use crate::domain::services::{SubmissionDraft, validate_submission};
use crate::error::ProblemResult;

/// Submit problem use case
pub struct SubmitProblemUseCase<R>
where
    R: ProblemRepository,
{
    repo: Arc<R>,
}

impl<R> SubmitProblemUseCase<R>
where
    R: ProblemRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Nothing is persisted unless validation passes
    pub async fn execute(&self, draft: SubmissionDraft) -> ProblemResult<Problem> {
        let new_problem = validate_submission(draft)?;
        let problem = self.repo.insert(&new_problem).await?;

        tracing::info!(
            problem_id = %problem.problem_id,
            status = %problem.status,
            "Problem submitted"
        );

        Ok(problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProblemError;
    use crate::infra::sqlite::SqliteProblemRepository;
    use platform::database::{Database, connect_in_memory};

    async fn setup() -> (SubmitProblemUseCase<SqliteProblemRepository>, Arc<SqliteProblemRepository>) {
        let pool = connect_in_memory().await.unwrap();
        let repo = Arc::new(SqliteProblemRepository::new(Database::ready(pool)));
        (SubmitProblemUseCase::new(repo.clone()), repo)
    }

    fn draft() -> SubmissionDraft {
        SubmissionDraft {
            name: Some("A".to_string()),
            contact_no: Some("123".to_string()),
            problem: Some("leak".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_submit_then_get() {
        let (use_case, repo) = setup().await;

        let created = use_case.execute(draft()).await.unwrap();
        let found = repo.find_by_id(created.problem_id).await.unwrap().unwrap();

        assert_eq!(found.name, "A");
        assert_eq!(found.contact_no, "123");
        assert_eq!(found.problem, "leak");
    }

    #[tokio::test]
    async fn test_rejected_submissions_persist_nothing() {
        let (use_case, repo) = setup().await;

        let rejected = [
            SubmissionDraft { name: None, ..draft() },
            SubmissionDraft { contact_no: Some(" ".to_string()), ..draft() },
            SubmissionDraft { problem: None, ..draft() },
            SubmissionDraft { status: Some(Some("Retired".to_string())), ..draft() },
            SubmissionDraft { status: Some(Some(String::new())), ..draft() },
            SubmissionDraft { status: Some(None), ..draft() },
        ];

        for draft in rejected {
            let err = use_case.execute(draft).await.unwrap_err();
            assert!(matches!(
                err,
                ProblemError::MissingRequiredFields | ProblemError::InvalidStatus
            ));
        }

        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
