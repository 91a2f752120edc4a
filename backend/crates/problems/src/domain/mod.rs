//! Domain Layer

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entities::{NewProblem, Problem, ProblemSummary};
pub use repository::ProblemRepository;
pub use value_objects::{ProblemId, ProblemQuery, ProblemStatus, SortKey, SortOrder};
