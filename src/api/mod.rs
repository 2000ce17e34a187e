//! HTTP API module for the PayTrack engine.
//!
//! This module exposes punching, finalization, history and the admin
//! payroll views as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{ACTOR_HEADER, create_router};
pub use request::{FinalizeRequest, PunchRequest, RateUpdateRequest, RegisterRequest, SessionsQuery};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
