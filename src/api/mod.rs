//! HTTP API module for the time and leave engine.
//!
//! A thin axum surface over [`crate::store::MemStore`]: handlers parse the
//! request, delegate to the store, and map engine errors to structured
//! JSON error responses.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ApplyLeaveRequest, BalanceQuery, CancelRequest, ClockInRequest, ClockOutRequest,
    CompOffApproveRequest, CompOffRequest, RegularizationRequest, ReviewRequest,
};
pub use response::ApiError;
pub use state::AppState;
