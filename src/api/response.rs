//! Response types for the time and leave engine API.
//!
//! Defines the success payloads plus the error envelope and the mapping
//! from [`EngineError`] to HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{
    AttendanceRecord, AttendanceRegularization, ClockEntry, CompOffGrant, LeaveBalance,
};
use crate::store::BalanceSummary;
use crate::workflow::{
    ClockInOutcome, ClockOutOutcome, CompOffApproval, RegularizationDecision,
    RegularizationSubmission,
};

/// Payload for clock-in responses.
#[derive(Debug, Clone, Serialize)]
pub struct ClockInResponse {
    /// The day's attendance record.
    pub record: AttendanceRecord,
    /// The opened clock entry.
    pub entry: ClockEntry,
    /// Whether this clock-in created the record.
    pub record_created: bool,
}

impl From<ClockInOutcome> for ClockInResponse {
    fn from(outcome: ClockInOutcome) -> Self {
        Self {
            record: outcome.record,
            entry: outcome.entry,
            record_created: outcome.record_created,
        }
    }
}

/// Payload for clock-out responses.
#[derive(Debug, Clone, Serialize)]
pub struct ClockOutResponse {
    /// The day's attendance record with recomputed hours.
    pub record: AttendanceRecord,
    /// The closed clock entry.
    pub entry: ClockEntry,
}

impl From<ClockOutOutcome> for ClockOutResponse {
    fn from(outcome: ClockOutOutcome) -> Self {
        Self {
            record: outcome.record,
            entry: outcome.entry,
        }
    }
}

/// Payload for `GET /leave/balance`.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    /// Leave type code.
    pub leave_type: String,
    /// Balance year.
    pub year: i32,
    /// Stored current balance.
    pub current: Decimal,
    /// Days held by pending requests.
    pub pending: Decimal,
    /// current - pending.
    pub available: Decimal,
}

impl From<BalanceSummary> for BalanceResponse {
    fn from(summary: BalanceSummary) -> Self {
        Self {
            leave_type: summary.leave_type,
            year: summary.year,
            current: summary.current,
            pending: summary.pending,
            available: summary.available,
        }
    }
}

/// Payload for regularization endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct RegularizationResponse {
    /// The regularization in its current state.
    pub regularization: AttendanceRegularization,
    /// The targeted attendance record.
    pub record: AttendanceRecord,
    /// Whether submission created the record; absent on review responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_created: Option<bool>,
}

impl From<RegularizationSubmission> for RegularizationResponse {
    fn from(submission: RegularizationSubmission) -> Self {
        Self {
            regularization: submission.regularization,
            record: submission.record,
            record_created: Some(submission.record_created),
        }
    }
}

impl From<RegularizationDecision> for RegularizationResponse {
    fn from(decision: RegularizationDecision) -> Self {
        Self {
            regularization: decision.regularization,
            record: decision.record,
            record_created: None,
        }
    }
}

/// Payload for `POST /comp-off/{id}/approve`.
#[derive(Debug, Clone, Serialize)]
pub struct CompOffApprovalResponse {
    /// The granted comp-off.
    pub grant: CompOffGrant,
    /// The credited comp-off balance row.
    pub balance: LeaveBalance,
}

impl From<CompOffApproval> for CompOffApprovalResponse {
    fn from(approval: CompOffApproval) -> Self {
        Self {
            grant: approval.grant,
            balance: approval.balance,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::EmployeeNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "EMPLOYEE_NOT_FOUND",
                    format!("Employee not found: {}", id),
                ),
            },
            EngineError::LeaveTypeNotFound { code } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "LEAVE_TYPE_NOT_FOUND",
                    format!("Leave type not found: {}", code),
                ),
            },
            EngineError::RequestNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "REQUEST_NOT_FOUND",
                    format!("Leave request not found: {}", id),
                ),
            },
            EngineError::RegularizationNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "REGULARIZATION_NOT_FOUND",
                    format!("Regularization not found: {}", id),
                ),
            },
            EngineError::CompOffNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "COMP_OFF_NOT_FOUND",
                    format!("Comp-off request not found: {}", id),
                ),
            },
            EngineError::Conflict { message } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("CONFLICT", message),
            },
            EngineError::Validation { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("VALIDATION_ERROR", message),
            },
            EngineError::Forbidden { message } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("FORBIDDEN", message),
            },
        }
    }
}
