//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{StudentsCommand, StudentsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub students: Arc<dyn StudentsCommand>,
    pub students_query: Arc<dyn StudentsQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(students: Arc<dyn StudentsCommand>, students_query: Arc<dyn StudentsQuery>) -> Self {
        Self {
            students,
            students_query,
        }
    }

    /// Construct state from one service implementing both driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use student_records::domain::StudentService;
    /// use student_records::inbound::http::state::HttpState;
    /// use student_records::outbound::memory::InMemoryStudentRepository;
    ///
    /// let service = StudentService::new(Arc::new(InMemoryStudentRepository::new()));
    /// let _state = HttpState::from_service(Arc::new(service));
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: StudentsCommand + StudentsQuery + 'static,
    {
        Self {
            students: service.clone(),
            students_query: service,
        }
    }
}
