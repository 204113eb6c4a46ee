//! JSON error responses and the mapping from service errors.

use crate::approval::services::ApprovalError;
use crate::assignment::services::{ApplicationError, TeamError};
use crate::auth::domain::AuthError;
use crate::comment::services::DiscussionError;
use crate::portfolio::services::PortfolioError;
use crate::reporting::services::ReportingError;
use crate::review::services::ReviewError;
use crate::task::services::{BrowseError, TaskCatalogError, TaskMentorError};
use crate::user::domain::AccessDenied;
use crate::user::services::AccountServiceError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt::Display;
use thiserror::Error;
use tracing::error;

/// Error returned by every handler.
///
/// Renders as `{"detail": "<message>", "error": true}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input or a violated business rule.
    #[error("{0}")]
    BadRequest(String),

    /// Missing, invalid or revoked credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller may not perform the operation.
    #[error("{0}")]
    Forbidden(String),

    /// The target resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Infrastructure failure; the cause is logged, not returned.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Wraps an unexpected failure.
    pub fn internal(err: impl Display) -> Self {
        Self::Internal(err.to_string())
    }

    fn bad_request(err: impl Display) -> Self {
        Self::BadRequest(err.to_string())
    }

    fn forbidden(err: impl Display) -> Self {
        Self::Forbidden(err.to_string())
    }

    fn not_found(err: impl Display) -> Self {
        Self::NotFound(err.to_string())
    }

    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(cause) = &self {
            error!(%cause, "request failed");
        }
        let body = json!({ "detail": self.to_string(), "error": true });
        (self.status(), Json(body)).into_response()
    }
}

impl From<AccessDenied> for ApiError {
    fn from(err: AccessDenied) -> Self {
        Self::forbidden(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::UserNotFound
            | AuthError::TokenRevoked => Self::Unauthorized(err.to_string()),
            AuthError::AccountDeleted | AuthError::AccountDisabled | AuthError::AccountPending => {
                Self::forbidden(err)
            }
            AuthError::Hashing(_) | AuthError::Signing(_) | AuthError::Repository(_) => {
                Self::internal(err)
            }
        }
    }
}

impl From<AccountServiceError> for ApiError {
    fn from(err: AccountServiceError) -> Self {
        match err {
            AccountServiceError::Domain(_)
            | AccountServiceError::EmailTaken
            | AccountServiceError::RoleMismatch(_) => Self::bad_request(err),
            AccountServiceError::Forbidden(_) => Self::forbidden(err),
            AccountServiceError::NotFound(_) => Self::not_found(err),
            AccountServiceError::Auth(inner) => inner.into(),
            AccountServiceError::Repository(_) => Self::internal(err),
        }
    }
}

impl From<TaskCatalogError> for ApiError {
    fn from(err: TaskCatalogError) -> Self {
        match err {
            TaskCatalogError::Domain(_) => Self::bad_request(err),
            TaskCatalogError::Forbidden(_) => Self::forbidden(err),
            TaskCatalogError::NotFound(_) => Self::not_found(err),
            TaskCatalogError::Repository(_) => Self::internal(err),
        }
    }
}

impl From<BrowseError> for ApiError {
    fn from(err: BrowseError) -> Self {
        match err {
            BrowseError::Forbidden(_) => Self::forbidden(err),
            BrowseError::NotFound(_) => Self::not_found(err),
            BrowseError::Tasks(_) | BrowseError::Assignments(_) => Self::internal(err),
        }
    }
}

impl From<TaskMentorError> for ApiError {
    fn from(err: TaskMentorError) -> Self {
        match err {
            TaskMentorError::MentorNotFound(_) => Self::bad_request(err),
            TaskMentorError::Forbidden(_) => Self::forbidden(err),
            TaskMentorError::TaskNotFound(_) => Self::not_found(err),
            TaskMentorError::Repository(_) | TaskMentorError::Users(_) => Self::internal(err),
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(_)
            | ApplicationError::AlreadyRequested
            | ApplicationError::NotAcceptingApplications(_) => Self::bad_request(err),
            ApplicationError::Forbidden(_) | ApplicationError::NdaRequired => Self::forbidden(err),
            ApplicationError::TaskNotFound(_) | ApplicationError::NotFound(_) => {
                Self::not_found(err)
            }
            ApplicationError::Portfolio(_)
            | ApplicationError::Repository(_)
            | ApplicationError::Tasks(_)
            | ApplicationError::PortfolioRepository(_) => Self::internal(err),
        }
    }
}

impl From<TeamError> for ApiError {
    fn from(err: TeamError) -> Self {
        match err {
            TeamError::TaskNotFound(_) => Self::not_found(err),
            TeamError::Assignments(_) | TeamError::Tasks(_) | TeamError::Users(_) => {
                Self::internal(err)
            }
        }
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::Domain(_)
            | ReviewError::Lifecycle(_)
            | ReviewError::NotActive(_)
            | ReviewError::AlreadyReviewed(_) => Self::bad_request(err),
            ReviewError::Forbidden(_) => Self::forbidden(err),
            ReviewError::AssignmentNotFound(_) => Self::not_found(err),
            ReviewError::Repository(_) | ReviewError::Assignments(_) => Self::internal(err),
        }
    }
}

impl From<ApprovalError> for ApiError {
    fn from(err: ApprovalError) -> Self {
        match err {
            ApprovalError::Domain(_) | ApprovalError::NotOffered(_) => Self::bad_request(err),
            ApprovalError::Forbidden(_) => Self::forbidden(err),
            ApprovalError::TaskNotFound(_) | ApprovalError::NotFound(_) => Self::not_found(err),
            ApprovalError::Repository(_) | ApprovalError::Tasks(_) => Self::internal(err),
        }
    }
}

impl From<DiscussionError> for ApiError {
    fn from(err: DiscussionError) -> Self {
        match err {
            DiscussionError::Domain(_) => Self::bad_request(err),
            DiscussionError::Forbidden(_) | DiscussionError::NdaRequired(_) => {
                Self::forbidden(err)
            }
            DiscussionError::TaskNotFound(_) | DiscussionError::NotFound(_) => {
                Self::not_found(err)
            }
            DiscussionError::Repository(_)
            | DiscussionError::Tasks(_)
            | DiscussionError::Assignments(_) => Self::internal(err),
        }
    }
}

impl From<PortfolioError> for ApiError {
    fn from(err: PortfolioError) -> Self {
        Self::internal(err)
    }
}

impl From<ReportingError> for ApiError {
    fn from(err: ReportingError) -> Self {
        match err {
            ReportingError::Forbidden(_) => Self::forbidden(err),
            ReportingError::StudentNotFound(_) | ReportingError::TaskNotFound(_) => {
                Self::not_found(err)
            }
            ReportingError::Users(_)
            | ReportingError::Tasks(_)
            | ReportingError::Assignments(_)
            | ReportingError::Reviews(_) => Self::internal(err),
        }
    }
}
