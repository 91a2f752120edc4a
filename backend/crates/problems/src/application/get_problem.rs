//! Get / Delete Problem Use Cases
//!
//! Both take the identifier as it appeared in the path. Text that is not
//! an integer cannot name a stored record and is reported as not found.

use std::sync::Arc;

use crate::domain::entities::Problem;
use crate::domain::repository::ProblemRepository;
use crate::domain::value_objects::ProblemId;
use crate::error::{ProblemError, ProblemResult};

fn parse_id(raw: &str) -> ProblemResult<ProblemId> {
    raw.parse().map_err(|_| ProblemError::NotFound)
}

/// Get problem use case
pub struct GetProblemUseCase<R>
where
    R: ProblemRepository,
{
    repo: Arc<R>,
}

impl<R> GetProblemUseCase<R>
where
    R: ProblemRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, raw_id: &str) -> ProblemResult<Problem> {
        let problem_id = parse_id(raw_id)?;

        self.repo
            .find_by_id(problem_id)
            .await?
            .ok_or(ProblemError::NotFound)
    }
}

/// Delete problem use case
pub struct DeleteProblemUseCase<R>
where
    R: ProblemRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteProblemUseCase<R>
where
    R: ProblemRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Zero affected rows is the only not-found signal; there is no pre-read
    pub async fn execute(&self, raw_id: &str) -> ProblemResult<()> {
        let problem_id = parse_id(raw_id)?;

        if self.repo.delete_by_id(problem_id).await? == 0 {
            return Err(ProblemError::NotFound);
        }

        tracing::info!(problem_id = %problem_id, "Problem deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::SubmissionDraft;
    use crate::application::SubmitProblemUseCase;
    use crate::infra::sqlite::SqliteProblemRepository;
    use platform::database::{Database, connect_in_memory};

    async fn setup() -> (Arc<SqliteProblemRepository>, Problem) {
        let pool = connect_in_memory().await.unwrap();
        let repo = Arc::new(SqliteProblemRepository::new(Database::ready(pool)));
        let created = SubmitProblemUseCase::new(repo.clone())
            .execute(SubmissionDraft {
                name: Some("A".to_string()),
                contact_no: Some("123".to_string()),
                problem: Some("leak".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        (repo, created)
    }

    #[tokio::test]
    async fn test_get_existing_and_missing() {
        let (repo, created) = setup().await;
        let get = GetProblemUseCase::new(repo);

        let id = created.problem_id.to_string();
        assert_eq!(get.execute(&id).await.unwrap(), created);

        assert!(matches!(get.execute("9999").await, Err(ProblemError::NotFound)));
        assert!(matches!(get.execute("abc").await, Err(ProblemError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_existing_then_missing() {
        let (repo, created) = setup().await;
        let delete = DeleteProblemUseCase::new(repo.clone());
        let get = GetProblemUseCase::new(repo.clone());
        let id = created.problem_id.to_string();

        assert!(matches!(delete.execute("9999").await, Err(ProblemError::NotFound)));
        assert_eq!(repo.count().await.unwrap(), 1);

        delete.execute(&id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(matches!(get.execute(&id).await, Err(ProblemError::NotFound)));
        assert!(matches!(delete.execute(&id).await, Err(ProblemError::NotFound)));
    }
}
