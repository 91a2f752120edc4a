//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::{
    CountProblemsUseCase, DeleteProblemUseCase, GetProblemUseCase, ListProblemsUseCase,
    RecentProblemsUseCase, SubmitProblemUseCase,
};
use crate::domain::repository::ProblemRepository;
use crate::domain::value_objects::ProblemQuery;
use crate::error::ProblemResult;
use crate::presentation::dto::{
    CountResponse, ListProblemsQuery, ListResponse, MessageResponse, ProblemResponse,
    ProblemSummaryResponse, SubmitProblemRequest, SubmitProblemResponse,
};

/// Shared state for problem handlers
#[derive(Clone)]
pub struct ProblemsAppState<R>
where
    R: ProblemRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// POST /api/problems
pub async fn submit_problem<R>(
    State(state): State<ProblemsAppState<R>>,
    payload: Result<Json<SubmitProblemRequest>, JsonRejection>,
) -> ProblemResult<impl IntoResponse>
where
    R: ProblemRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let problem = SubmitProblemUseCase::new(state.repo.clone())
        .execute(req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitProblemResponse {
            message: "Problem submitted successfully",
            data: problem.into(),
        }),
    ))
}

/// GET /api/problems
pub async fn list_problems<R>(
    State(state): State<ProblemsAppState<R>>,
    query: Result<Query<ListProblemsQuery>, QueryRejection>,
) -> ProblemResult<Json<ListResponse<ProblemResponse>>>
where
    R: ProblemRepository + Clone + Send + Sync + 'static,
{
    let Query(q) = query?;
    let query = ProblemQuery::from_raw(
        q.field.as_deref(),
        q.status.as_deref(),
        q.sort_by.as_deref(),
        q.sort_order.as_deref(),
    );

    let problems = ListProblemsUseCase::new(state.repo.clone())
        .execute(query)
        .await?;

    Ok(Json(ListResponse::new(
        problems.into_iter().map(ProblemResponse::from).collect(),
    )))
}

/// GET /api/problems/{id}
pub async fn get_problem<R>(
    State(state): State<ProblemsAppState<R>>,
    Path(id): Path<String>,
) -> ProblemResult<Json<ProblemResponse>>
where
    R: ProblemRepository + Clone + Send + Sync + 'static,
{
    let problem = GetProblemUseCase::new(state.repo.clone())
        .execute(&id)
        .await?;

    Ok(Json(problem.into()))
}

/// DELETE /api/problems/{id}
pub async fn delete_problem<R>(
    State(state): State<ProblemsAppState<R>>,
    Path(id): Path<String>,
) -> ProblemResult<Json<MessageResponse>>
where
    R: ProblemRepository + Clone + Send + Sync + 'static,
{
    DeleteProblemUseCase::new(state.repo.clone())
        .execute(&id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Problem deleted successfully",
    }))
}

/// GET /api/problems/count
pub async fn count_problems<R>(
    State(state): State<ProblemsAppState<R>>,
) -> ProblemResult<Json<CountResponse>>
where
    R: ProblemRepository + Clone + Send + Sync + 'static,
{
    let count = CountProblemsUseCase::new(state.repo.clone())
        .execute()
        .await?;

    Ok(Json(CountResponse {
        count,
        message: "Total problems in database",
    }))
}

/// GET /api/problems/recent
pub async fn recent_problems<R>(
    State(state): State<ProblemsAppState<R>>,
) -> ProblemResult<Json<ListResponse<ProblemSummaryResponse>>>
where
    R: ProblemRepository + Clone + Send + Sync + 'static,
{
    let recent = RecentProblemsUseCase::new(state.repo.clone())
        .execute()
        .await?;

    Ok(Json(ListResponse::new(
        recent.into_iter().map(ProblemSummaryResponse::from).collect(),
    )))
}
