//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ProblemsAppState;
pub use router::{problems_router, problems_router_generic};
