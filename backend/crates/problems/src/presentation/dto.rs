//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::entities::{Problem, ProblemSummary};
use crate::domain::services::SubmissionDraft;
use crate::domain::value_objects::ProblemStatus;

// ============================================================================
// Submit
// ============================================================================

/// Submit request. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProblemRequest {
    pub name: Option<String>,
    pub contact_no: Option<String>,
    pub problem: Option<String>,
    /// Absent → `None`; present → `Some(value)`, including `null`
    #[serde(default, deserialize_with = "present")]
    pub status: Option<Value>,
    pub field: Option<String>,
    pub problem_type: Option<String>,
    pub urgency: Option<String>,
    pub when_started: Option<String>,
    pub solutions_tried: Option<String>,
    pub expected_outcome: Option<String>,
}

/// Only invoked when the key exists, so `null` arrives as `Some(Value::Null)`
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl From<SubmitProblemRequest> for SubmissionDraft {
    fn from(req: SubmitProblemRequest) -> Self {
        SubmissionDraft {
            name: req.name,
            contact_no: req.contact_no,
            problem: req.problem,
            // Non-string status values can never be valid
            status: req.status.map(|v| v.as_str().map(str::to_string)),
            field: req.field,
            problem_type: req.problem_type,
            urgency: req.urgency,
            when_started: req.when_started,
            solutions_tried: req.solutions_tried,
            expected_outcome: req.expected_outcome,
        }
    }
}

/// Submit response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProblemResponse {
    pub message: &'static str,
    pub data: ProblemResponse,
}

// ============================================================================
// Records
// ============================================================================

/// Full problem record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemResponse {
    pub id: i64,
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

impl From<Problem> for ProblemResponse {
    fn from(p: Problem) -> Self {
        Self {
            id: p.problem_id.get(),
            name: p.name,
            contact_no: p.contact_no,
            status: p.status,
            problem: p.problem,
            field: p.field,
            problem_type: p.problem_type,
            urgency: p.urgency,
            when_started: p.when_started,
            solutions_tried: p.solutions_tried,
            expected_outcome: p.expected_outcome,
            created_at: p.created_at,
        }
    }
}

/// Summary record for the recent view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSummaryResponse {
    pub id: i64,
    pub name: String,
    pub field: String,
    pub created_at: DateTime<Utc>,
}

impl From<ProblemSummary> for ProblemSummaryResponse {
    fn from(s: ProblemSummary) -> Self {
        Self {
            id: s.problem_id.get(),
            name: s.name,
            field: s.field,
            created_at: s.created_at,
        }
    }
}

// ============================================================================
// List / Count / Delete
// ============================================================================

/// List query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProblemsQuery {
    pub field: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Counted collection (`{count, data}`)
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Count response
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub count: i64,
    pub message: &'static str,
}

/// Plain message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SubmissionDraft {
        serde_json::from_str::<SubmitProblemRequest>(json)
            .unwrap()
            .into()
    }

    #[test]
    fn test_status_absent_null_and_string() {
        assert_eq!(parse(r#"{"name":"A"}"#).status, None);
        assert_eq!(parse(r#"{"status":null}"#).status, Some(None));
        assert_eq!(parse(r#"{"status":""}"#).status, Some(Some(String::new())));
        assert_eq!(
            parse(r#"{"status":"Working"}"#).status,
            Some(Some("Working".to_string()))
        );
        assert_eq!(parse(r#"{"status":3}"#).status, Some(None));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let draft = parse(r#"{"name":"A","contactNo":"1","problem":"p","extra":true}"#);
        assert_eq!(draft.contact_no.as_deref(), Some("1"));
    }
}
