//! Builders for the student service and the HTTP state wrapping it.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use student_records::domain::StudentService;
use student_records::domain::ports::StudentRepository;
use student_records::inbound::http::state::HttpState;
use student_records::outbound::memory::InMemoryStudentRepository;
use student_records::outbound::persistence::{DbPool, DieselStudentRepository};

use super::ServerConfig;

/// Service over whichever storage adapter the configuration selects.
pub type SharedStudentService = Arc<StudentService<dyn StudentRepository>>;

/// Pick the storage adapter: PostgreSQL when a pool is available, otherwise
/// a fresh in-memory store.
fn build_student_repository(pool: Option<&DbPool>) -> Arc<dyn StudentRepository> {
    match pool {
        Some(pool) => {
            info!(store = "postgres", "student repository selected");
            Arc::new(DieselStudentRepository::new(pool.clone()))
        }
        None => {
            info!(store = "memory", "student repository selected");
            Arc::new(InMemoryStudentRepository::new())
        }
    }
}

/// Build the student service for `config`.
pub fn build_student_service(config: &ServerConfig) -> SharedStudentService {
    let repository = build_student_repository(config.db_pool.as_ref());
    Arc::new(StudentService::new(repository).with_merge_policy(config.merge_policy))
}

/// Wrap the service in the state shared by every HTTP worker.
pub(crate) fn build_http_state(service: SharedStudentService) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_service(service))
}
