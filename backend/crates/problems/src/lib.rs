//! Problems Backend Module
//!
//! Public problem submission and the admin-only review operations over it.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, validation, repository trait
//! - `application/` - Use cases
//! - `infra/` - SQLite implementation
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use domain::value_objects::{ProblemId, ProblemQuery, ProblemStatus, SortKey, SortOrder};
pub use error::{ProblemError, ProblemResult};
pub use infra::sqlite::SqliteProblemRepository;
pub use presentation::router::{problems_router, problems_router_generic};
