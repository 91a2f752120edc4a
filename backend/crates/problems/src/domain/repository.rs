//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::{NewProblem, Problem, ProblemSummary};
use crate::domain::value_objects::{ProblemId, ProblemQuery};
use crate::error::ProblemResult;

/// Problem repository trait
#[trait_variant::make(ProblemRepository: Send)]
pub trait LocalProblemRepository {
    /// Insert; the store assigns id and creation time
    async fn insert(&self, problem: &NewProblem) -> ProblemResult<Problem>;

    /// Find problem by ID
    async fn find_by_id(&self, problem_id: ProblemId) -> ProblemResult<Option<Problem>>;

    /// Filtered, ordered listing
    async fn list(&self, query: &ProblemQuery) -> ProblemResult<Vec<Problem>>;

    /// Delete by ID, returning the number of rows removed
    async fn delete_by_id(&self, problem_id: ProblemId) -> ProblemResult<u64>;

    /// Total number of problems
    async fn count(&self) -> ProblemResult<i64>;

    /// Newest `limit` problems
    async fn recent(&self, limit: u32) -> ProblemResult<Vec<ProblemSummary>>;
}
