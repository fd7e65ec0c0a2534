//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every student and health endpoint together with the
//! schema wrappers from [`crate::inbound::http::schemas`], which give domain
//! types an OpenAPI shape without coupling them to utoipa.
//!
//! The document is served by Swagger UI in debug builds and printed by
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, MilitaryStatusSchema, ParentSchema, PreviousEducationSchema,
    RecentEducationSchema, StudentDraftSchema, StudentSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student records API",
        description = "CRUD interface for student enrollment records and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::get_student,
        crate::inbound::http::students::create_student,
        crate::inbound::http::students::update_student,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::health::index,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        StudentSchema,
        StudentDraftSchema,
        ParentSchema,
        MilitaryStatusSchema,
        PreviousEducationSchema,
        RecentEducationSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "students", description = "Student record management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
