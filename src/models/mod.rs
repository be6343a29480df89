// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Match, PageResponse, RawUser, User};
pub use requests::{PageInput, PageInputRequest, SelectUserRequest, SetFilterRequest, SortRequest};
pub use responses::{ErrorResponse, HealthResponse};
