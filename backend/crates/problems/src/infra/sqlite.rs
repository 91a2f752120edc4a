//! SQLite Repository Implementation

use chrono::{DateTime, Utc};
use platform::database::Database;
use sqlx::{QueryBuilder, Sqlite};

use crate::domain::entities::{NewProblem, Problem, ProblemSummary};
use crate::domain::repository::ProblemRepository;
use crate::domain::value_objects::{ProblemId, ProblemQuery, ProblemStatus};
use crate::error::{ProblemError, ProblemResult};

const PROBLEM_COLUMNS: &str = r#"
    problem_id,
    name,
    contact_no,
    status,
    problem,
    field,
    problem_type,
    urgency,
    when_started,
    solutions_tried,
    expected_outcome,
    created_at_ms
"#;

/// SQLite-backed problem repository
#[derive(Clone, Debug)]
pub struct SqliteProblemRepository {
    db: Database,
}

impl SqliteProblemRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl ProblemRepository for SqliteProblemRepository {
    async fn insert(&self, problem: &NewProblem) -> ProblemResult<Problem> {
        let pool = self.db.pool()?;
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO problems (
                name,
                contact_no,
                status,
                problem,
                field,
                problem_type,
                urgency,
                when_started,
                solutions_tried,
                expected_outcome,
                created_at_ms
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&problem.name)
        .bind(&problem.contact_no)
        .bind(problem.status.as_str())
        .bind(&problem.problem)
        .bind(&problem.field)
        .bind(problem.problem_type.as_deref())
        .bind(problem.urgency.as_deref())
        .bind(problem.when_started.as_deref())
        .bind(problem.solutions_tried.as_deref())
        .bind(problem.expected_outcome.as_deref())
        .bind(created_at.timestamp_millis())
        .execute(pool)
        .await?;

        // Round-trip through millis so the returned value equals a later read
        let created_at = from_millis(created_at.timestamp_millis());

        Ok(Problem {
            problem_id: ProblemId::from_raw(result.last_insert_rowid()),
            name: problem.name.clone(),
            contact_no: problem.contact_no.clone(),
            status: problem.status,
            problem: problem.problem.clone(),
            field: problem.field.clone(),
            problem_type: problem.problem_type.clone(),
            urgency: problem.urgency.clone(),
            when_started: problem.when_started.clone(),
            solutions_tried: problem.solutions_tried.clone(),
            expected_outcome: problem.expected_outcome.clone(),
            created_at,
        })
    }

    async fn find_by_id(&self, problem_id: ProblemId) -> ProblemResult<Option<Problem>> {
        let pool = self.db.pool()?;

        let sql = format!("SELECT {PROBLEM_COLUMNS} FROM problems WHERE problem_id = ?");
        let row = sqlx::query_as::<_, ProblemRow>(&sql)
            .bind(problem_id.get())
            .fetch_optional(pool)
            .await?;

        row.map(ProblemRow::into_problem).transpose()
    }

    async fn list(&self, query: &ProblemQuery) -> ProblemResult<Vec<Problem>> {
        let pool = self.db.pool()?;

        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {PROBLEM_COLUMNS} FROM problems WHERE 1 = 1"
        ));

        if let Some(field) = &query.field {
            qb.push(" AND field = ").push_bind(field.clone());
        }
        if let Some(status) = &query.status {
            qb.push(" AND status = ").push_bind(status.clone());
        }

        // Column and direction come from enums, never from the client
        let order = query.sort_order.as_sql();
        qb.push(" ORDER BY ")
            .push(query.sort_key.column())
            .push(" ")
            .push(order)
            .push(", problem_id ")
            .push(order);

        let rows = qb.build_query_as::<ProblemRow>().fetch_all(pool).await?;

        rows.into_iter().map(ProblemRow::into_problem).collect()
    }

    async fn delete_by_id(&self, problem_id: ProblemId) -> ProblemResult<u64> {
        let pool = self.db.pool()?;

        let deleted = sqlx::query("DELETE FROM problems WHERE problem_id = ?")
            .bind(problem_id.get())
            .execute(pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn count(&self) -> ProblemResult<i64> {
        let pool = self.db.pool()?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM problems")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    async fn recent(&self, limit: u32) -> ProblemResult<Vec<ProblemSummary>> {
        let pool = self.db.pool()?;

        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT problem_id, name, field, created_at_ms
            FROM problems
            ORDER BY created_at_ms DESC, problem_id DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(SummaryRow::into_summary).collect())
    }
}

fn from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or(DateTime::UNIX_EPOCH)
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProblemRow {
    problem_id: i64,
    name: String,
    contact_no: String,
    status: String,
    problem: String,
    field: String,
    problem_type: Option<String>,
    urgency: Option<String>,
    when_started: Option<String>,
    solutions_tried: Option<String>,
    expected_outcome: Option<String>,
    created_at_ms: i64,
}

impl ProblemRow {
    fn into_problem(self) -> ProblemResult<Problem> {
        let status: ProblemStatus = self.status.parse().map_err(|_| {
            ProblemError::Internal(format!(
                "Stored problem {} has unknown status {:?}",
                self.problem_id, self.status
            ))
        })?;

        Ok(Problem {
            problem_id: ProblemId::from_raw(self.problem_id),
            name: self.name,
            contact_no: self.contact_no,
            status,
            problem: self.problem,
            field: self.field,
            problem_type: self.problem_type,
            urgency: self.urgency,
            when_started: self.when_started,
            solutions_tried: self.solutions_tried,
            expected_outcome: self.expected_outcome,
            created_at: from_millis(self.created_at_ms),
        })
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    problem_id: i64,
    name: String,
    field: String,
    created_at_ms: i64,
}

impl SummaryRow {
    fn into_summary(self) -> ProblemSummary {
        ProblemSummary {
            problem_id: ProblemId::from_raw(self.problem_id),
            name: self.name,
            field: self.field,
            created_at: from_millis(self.created_at_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{SortKey, SortOrder};
    use platform::database::connect_in_memory;

    async fn repo() -> SqliteProblemRepository {
        let pool = connect_in_memory().await.unwrap();
        SqliteProblemRepository::new(Database::ready(pool))
    }

    fn new_problem(name: &str, field: &str, status: ProblemStatus) -> NewProblem {
        NewProblem {
            name: name.to_string(),
            contact_no: "123".to_string(),
            status,
            problem: "leak".to_string(),
            field: field.to_string(),
            problem_type: None,
            urgency: Some("High".to_string()),
            when_started: None,
            solutions_tried: None,
            expected_outcome: None,
        }
    }

    async fn seed(repo: &SqliteProblemRepository) -> Vec<Problem> {
        let mut created = Vec::new();
        for (name, field, status) in [
            ("Charlie", "Plumbing", ProblemStatus::Working),
            ("alice", "Electrical", ProblemStatus::Student),
            ("Bob", "Plumbing", ProblemStatus::Student),
            ("Dana", "Plumbing Extra", ProblemStatus::Neither),
        ] {
            created.push(repo.insert(&new_problem(name, field, status)).await.unwrap());
        }
        created
    }

    fn names(problems: &[Problem]) -> Vec<&str> {
        problems.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = repo().await;
        let before = Utc::now() - chrono::Duration::milliseconds(1);
        let created = repo
            .insert(&new_problem("A", "", ProblemStatus::Neither))
            .await
            .unwrap();

        let found = repo.find_by_id(created.problem_id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(found.created_at >= before);
    }

    #[tokio::test]
    async fn test_default_listing_is_newest_first() {
        let repo = repo().await;
        seed(&repo).await;

        let all = repo.list(&ProblemQuery::default()).await.unwrap();
        assert_eq!(names(&all), ["Dana", "Bob", "alice", "Charlie"]);
    }

    #[tokio::test]
    async fn test_sort_by_name_asc_is_lexical() {
        let repo = repo().await;
        seed(&repo).await;

        let query = ProblemQuery {
            sort_key: SortKey::Name,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        let sorted = repo.list(&query).await.unwrap();
        assert_eq!(names(&sorted), ["Bob", "Charlie", "Dana", "alice"]);
    }

    #[tokio::test]
    async fn test_filters_are_exact_and_combined() {
        let repo = repo().await;
        seed(&repo).await;

        let by_field = repo
            .list(&ProblemQuery::from_raw(Some("Plumbing"), None, None, None))
            .await
            .unwrap();
        assert_eq!(names(&by_field), ["Bob", "Charlie"]);

        let both = repo
            .list(&ProblemQuery::from_raw(Some("Plumbing"), Some("Student"), None, None))
            .await
            .unwrap();
        assert_eq!(names(&both), ["Bob"]);

        let unknown_status = repo
            .list(&ProblemQuery::from_raw(None, Some("Retired"), None, None))
            .await
            .unwrap();
        assert!(unknown_status.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let created = seed(&repo).await;

        assert_eq!(repo.delete_by_id(ProblemId::from_raw(9999)).await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), 4);

        assert_eq!(repo.delete_by_id(created[0].problem_id).await.unwrap(), 1);
        assert_eq!(repo.count().await.unwrap(), 3);
        assert!(repo.find_by_id(created[0].problem_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recent() {
        let repo = repo().await;
        for i in 0..7 {
            repo.insert(&new_problem(&format!("p{i}"), "f", ProblemStatus::Neither))
                .await
                .unwrap();
        }

        let recent = repo.recent(5).await.unwrap();
        let names: Vec<_> = recent.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["p6", "p5", "p4", "p3", "p2"]);
    }

    #[tokio::test]
    async fn test_pending_store() {
        let repo = SqliteProblemRepository::new(Database::pending());
        assert!(matches!(
            repo.count().await,
            Err(ProblemError::StoreUnavailable)
        ));
    }
}
