//! Domain Entities
//!
//! Core business entities for the problems domain.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{ProblemId, ProblemStatus};

/// Stored problem report. Never updated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub problem_id: ProblemId,
    pub name: String,
    pub contact_no: String,
    pub status: ProblemStatus,
    pub problem: String,
    pub field: String,
    pub problem_type: Option<String>,
    pub urgency: Option<String>,
    pub when_started: Option<String>,
    pub solutions_tried: Option<String>,
    pub expected_outcome: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated submission about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProblem {
    pub name: String,
    pub contact_no: String,
    pub status: ProblemStatus,
    pub problem: String,
    pub field: String,
    pub problem_type: Option<String>,
    pub urgency: Option<String>,
    pub when_started: Option<String>,
    pub solutions_tried: Option<String>,
    pub expected_outcome: Option<String>,
}

/// Projection used by the recent-submissions view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemSummary {
    pub problem_id: ProblemId,
    pub name: String,
    pub field: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Problem> for ProblemSummary {
    fn from(problem: &Problem) -> Self {
        Self {
            problem_id: problem.problem_id,
            name: problem.name.clone(),
            field: problem.field.clone(),
            created_at: problem.created_at,
        }
    }
}
