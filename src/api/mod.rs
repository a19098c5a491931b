//! HTTP API module for the timesheet engine.
//!
//! This module exposes the timesheet workflow over REST: viewing a month,
//! starting a timesheet, saving entries, submitting and reviewing.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ACTOR_EMAIL_HEADER, ACTOR_FIRST_NAME_HEADER, ACTOR_GROUPS_HEADER, ACTOR_LAST_NAME_HEADER,
    ReviewRequest, SaveEntriesRequest, StartRequest, SubmitRequest, actor_from_headers,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
