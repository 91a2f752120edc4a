//! Application Layer
//!
//! Use cases for the problems domain.

pub mod get_problem;
pub mod list_problems;
pub mod problem_stats;
pub mod submit_problem;

pub use get_problem::{DeleteProblemUseCase, GetProblemUseCase};
pub use list_problems::ListProblemsUseCase;
pub use problem_stats::{CountProblemsUseCase, RECENT_LIMIT, RecentProblemsUseCase};
pub use submit_problem::SubmitProblemUseCase;
