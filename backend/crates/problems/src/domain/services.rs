//! Domain Services
//!
//! Submission validation rules.

use crate::domain::entities::NewProblem;
use crate::domain::value_objects::ProblemStatus;
use crate::error::{ProblemError, ProblemResult};

pub const MAX_NAME_CHARS: usize = 200;
pub const MAX_CONTACT_CHARS: usize = 50;
pub const MAX_SHORT_TEXT_CHARS: usize = 100;
pub const MAX_LONG_TEXT_CHARS: usize = 5000;

/// Raw submission as received
///
/// `status`: `None` when the key is absent, `Some(None)` when it is
/// present but null or not a string.
#[derive(Debug, Clone, Default)]
pub struct SubmissionDraft {
    pub name: Option<String>,
    pub contact_no: Option<String>,
    pub problem: Option<String>,
    pub status: Option<Option<String>>,
    pub field: Option<String>,
    pub problem_type: Option<String>,
    pub urgency: Option<String>,
    pub when_started: Option<String>,
    pub solutions_tried: Option<String>,
    pub expected_outcome: Option<String>,
}

/// Check a draft and normalize it into an insertable record
pub fn validate_submission(draft: SubmissionDraft) -> ProblemResult<NewProblem> {
    let name = required(draft.name)?;
    let contact_no = required(draft.contact_no)?;
    let problem = required(draft.problem)?;

    let status = match draft.status {
        None => ProblemStatus::default(),
        Some(Some(raw)) => raw.parse().map_err(|_| ProblemError::InvalidStatus)?,
        Some(None) => return Err(ProblemError::InvalidStatus),
    };

    if !is_valid_contact_no(&contact_no) {
        return Err(ProblemError::InvalidContactNo);
    }

    let new_problem = NewProblem {
        name,
        contact_no,
        status,
        problem,
        field: draft.field.map(|f| f.trim().to_string()).unwrap_or_default(),
        problem_type: optional(draft.problem_type),
        urgency: optional(draft.urgency),
        when_started: optional(draft.when_started),
        solutions_tried: optional(draft.solutions_tried),
        expected_outcome: optional(draft.expected_outcome),
    };

    check_lengths(&new_problem)?;

    Ok(new_problem)
}

/// Digits, spaces and `+-()` only, with at least one digit
pub fn is_valid_contact_no(contact_no: &str) -> bool {
    contact_no.chars().any(|c| c.is_ascii_digit())
        && contact_no
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
}

fn required(value: Option<String>) -> ProblemResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ProblemError::MissingRequiredFields)
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_lengths(p: &NewProblem) -> ProblemResult<()> {
    let short = MAX_SHORT_TEXT_CHARS;
    let long = MAX_LONG_TEXT_CHARS;

    let checks: [(&'static str, Option<&str>, usize); 9] = [
        ("name", Some(p.name.as_str()), MAX_NAME_CHARS),
        ("contactNo", Some(p.contact_no.as_str()), MAX_CONTACT_CHARS),
        ("problem", Some(p.problem.as_str()), long),
        ("field", Some(p.field.as_str()), short),
        ("problemType", p.problem_type.as_deref(), short),
        ("urgency", p.urgency.as_deref(), short),
        ("whenStarted", p.when_started.as_deref(), short),
        ("solutionsTried", p.solutions_tried.as_deref(), long),
        ("expectedOutcome", p.expected_outcome.as_deref(), long),
    ];

    for (field, value, max) in checks {
        if value.is_some_and(|v| v.chars().count() > max) {
            return Err(ProblemError::FieldTooLong { field, max });
        }
    }

    Ok(())
}
