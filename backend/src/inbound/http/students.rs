//! Student records HTTP handlers.
//!
//! ```text
//! GET    /students
//! GET    /students/{id}
//! POST   /students        {"name": "...", "parent": {...}, ...}
//! PUT    /students/{id}   {"phone": "..."}
//! DELETE /students/{id}
//! ```
//!
//! Handlers parse the path identifier and hand the raw JSON body to the
//! driving ports; schema validation happens in the domain.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::Value;

use crate::domain::Student;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, StudentDraftSchema, StudentSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ID_FIELD, parse_student_id};

/// List every student in creation order.
#[utoipa::path(
    get,
    path = "/students",
    responses(
        (status = 200, description = "All students", body = [StudentSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Student>>> {
    let students = state.students_query.list().await?;
    Ok(web::Json(students))
}

/// Fetch one student.
#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = i64, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student", body = StudentSchema),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Student>> {
    let id = parse_student_id(&path.into_inner(), ID_FIELD)?;
    let student = state.students_query.get(id).await?;
    Ok(web::Json(student))
}

/// Create a student; the service assigns the identifier.
#[utoipa::path(
    post,
    path = "/students",
    request_body = StudentDraftSchema,
    responses(
        (status = 201, description = "Created student", body = StudentSchema),
        (status = 400, description = "Invalid payload", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let student = state.students.create(&payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(student))
}

/// Partially update a student.
///
/// Supplied top-level fields overwrite stored ones; the identifier never
/// changes.
#[utoipa::path(
    put,
    path = "/students/{id}",
    params(("id" = i64, Path, description = "Student identifier")),
    request_body(content = Object, description = "Subset of the student fields"),
    responses(
        (status = 200, description = "Updated student", body = StudentSchema),
        (status = 400, description = "Invalid identifier or payload", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<Student>> {
    let id = parse_student_id(&path.into_inner(), ID_FIELD)?;
    let student = state.students.update(id, &payload.into_inner()).await?;
    Ok(web::Json(student))
}

/// Delete a student.
#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(("id" = i64, Path, description = "Student identifier")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_student_id(&path.into_inner(), ID_FIELD)?;
    state.students.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the student routes and JSON extractor configuration.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use student_records::inbound::http::students::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(crate::inbound::http::validation::json_config())
        .service(list_students)
        .service(get_student)
        .service(create_student)
        .service(update_student)
        .service(delete_student);
}

#[cfg(test)]
#[path = "students_tests.rs"]
mod tests;
