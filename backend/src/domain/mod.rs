//! Domain primitives, schema rules and services for student records.
//!
//! Purpose: define the student aggregate, the rules that decide whether a
//! JSON payload describes a valid record, and the services that drive the
//! storage port. Nothing in here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Student, StudentDraft, StudentPatch, StudentId: the record model.
//! - validate_create / validate_patch: schema validation of raw payloads.
//! - IdAllocator: monotonic identifier source used by storage adapters.
//! - StudentService: implementation of the driving ports.

pub mod error;
pub mod id_allocator;
pub mod ports;
pub(crate) mod record_section;
pub mod student;
pub mod student_schema;
pub mod student_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::id_allocator::{IdAllocator, IdExhausted};
pub use self::student::{
    MilitaryStatus, MilitaryStatusPatch, NestedMergePolicy, Parent, ParentPatch,
    PreviousEducation, PreviousEducationPatch, RecentEducation, RecentEducationPatch, Student,
    StudentDraft, StudentId, StudentIdError, StudentPatch, StudentProfile, StudentProfilePatch,
    UnknownMergePolicy,
};
pub use self::student_schema::{
    ExpectedType, MILITARY_KEY, PARENT_KEY, PREVIOUS_EDUCATION_KEY, RECENT_EDUCATION_KEY,
    SchemaError, validate_create, validate_patch,
};
pub use self::student_service::{STUDENT_NOT_FOUND, StudentService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use student_records::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::not_found("Student not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
