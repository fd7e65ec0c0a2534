//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

#![expect(
    dead_code,
    reason = "Schema wrappers are only read by utoipa when generating OpenAPI"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested student does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The student store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "missing required field: military")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details, e.g. `{"field": "military", "code": "missing_field"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Parent`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Parent, rename_all = "camelCase")]
pub struct ParentSchema {
    name: String,
    employee: String,
    national_id: String,
    #[schema(example = "Father")]
    student_relation: String,
    address: String,
}

/// OpenAPI schema for [`crate::domain::MilitaryStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MilitaryStatus, rename_all = "camelCase")]
pub struct MilitaryStatusSchema {
    number: String,
    post_number: String,
    #[schema(example = "23/01/2021")]
    post_date: String,
    status: String,
    wanted_year: String,
    last_post_year: String,
    military_notes: String,
}

/// OpenAPI schema for [`crate::domain::PreviousEducation`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PreviousEducation, rename_all = "camelCase")]
pub struct PreviousEducationSchema {
    education: String,
    #[schema(example = "2017/2018")]
    grad_year: String,
}

/// OpenAPI schema for [`crate::domain::RecentEducation`].
///
/// `divisionId` also accepts a numeric string on input.
#[derive(ToSchema)]
#[schema(as = crate::domain::RecentEducation, rename_all = "camelCase")]
pub struct RecentEducationSchema {
    division_name: String,
    #[schema(example = 101)]
    division_id: i64,
    status: String,
    level: String,
    term: String,
}

/// OpenAPI schema for [`crate::domain::StudentDraft`], the create payload.
///
/// Every field is required; `id` and unknown fields are ignored.
#[derive(ToSchema)]
#[schema(as = crate::domain::StudentDraft, rename_all = "camelCase")]
pub struct StudentDraftSchema {
    #[schema(example = "Mohamed Ahmed")]
    name: String,
    address: String,
    national_id: String,
    email: String,
    #[schema(example = "14/02/2000")]
    birth_date: String,
    phone: String,
    govern: String,
    religion: String,
    gender: String,
    parent: ParentSchema,
    military: MilitaryStatusSchema,
    previous_education: PreviousEducationSchema,
    recent_education: RecentEducationSchema,
}

/// OpenAPI schema for [`crate::domain::Student`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Student, rename_all = "camelCase")]
pub struct StudentSchema {
    /// Identifier assigned by the service.
    #[schema(example = 1)]
    id: i64,
    name: String,
    address: String,
    national_id: String,
    email: String,
    birth_date: String,
    phone: String,
    govern: String,
    religion: String,
    gender: String,
    parent: ParentSchema,
    military: MilitaryStatusSchema,
    previous_education: PreviousEducationSchema,
    recent_education: RecentEducationSchema,
}
