//! Startup seeding orchestration.
//!
//! Demo students are loaded from the bundled fixture (or a configured
//! override) and created through the [`StudentsCommand`] port, so they pass
//! the same schema validation and identifier allocation as API traffic.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::domain::Error;
use crate::domain::ports::{StudentsCommand, StudentsQuery};
use crate::example_data::config::ExampleDataSettings;

/// Demo students shipped with the service.
pub const BUNDLED_STUDENTS: &str =
    include_str!("../../fixtures/example-data/students.json");

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Fixture file could not be read.
    #[error("failed to read example data at {path}: {source}")]
    FixtureRead {
        /// Path to the fixture file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Fixture is not valid JSON.
    #[error("example data is not valid JSON: {0}")]
    FixtureParse(#[from] serde_json::Error),
    /// Fixture JSON is not an array of student payloads.
    #[error("example data must be a JSON array of students")]
    NotAnArray,
    /// The store could not be queried for existing students.
    #[error("could not check for existing students: {source}")]
    ExistingCheck {
        /// Domain failure.
        #[source]
        source: Error,
    },
    /// A payload was rejected or could not be stored.
    #[error("example student {index} could not be created: {source}")]
    Seeding {
        /// Position of the payload in the fixture.
        index: usize,
        /// Domain failure.
        #[source]
        source: Error,
    },
}

/// Whether seeding wrote any records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    /// Fixture payloads were created.
    Applied,
    /// The store already held students, so nothing was written.
    AlreadySeeded,
}

/// Summary of a seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleDataSeedOutcome {
    pub result: SeedingResult,
    pub student_count: usize,
}

/// Apply example data on startup when enabled.
///
/// Seeding only writes into an empty store, so restarting against a
/// persistent database does not duplicate the demo students.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use student_records::domain::StudentService;
/// use student_records::example_data::{ExampleDataSettings, seed_example_data_on_startup};
/// use student_records::outbound::memory::InMemoryStudentRepository;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = ExampleDataSettings { enabled: true, fixture_path: None };
/// let service = StudentService::new(Arc::new(InMemoryStudentRepository::new()));
/// let outcome = seed_example_data_on_startup(&settings, &service).await?;
/// assert_eq!(outcome.map(|o| o.student_count), Some(2));
/// # Ok(())
/// # }
/// ```
pub async fn seed_example_data_on_startup<S>(
    settings: &ExampleDataSettings,
    students: &S,
) -> Result<Option<ExampleDataSeedOutcome>, StartupSeedingError>
where
    S: StudentsCommand + StudentsQuery + ?Sized,
{
    if !settings.is_enabled() {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    }

    let payloads = match settings.fixture_path() {
        Some(path) => parse_payloads(&load_fixture(path)?)?,
        None => parse_payloads(BUNDLED_STUDENTS)?,
    };

    let existing = students
        .list()
        .await
        .map_err(|source| StartupSeedingError::ExistingCheck { source })?;
    if !existing.is_empty() {
        info!(
            student_count = existing.len(),
            "example data already present; skipping"
        );
        return Ok(Some(ExampleDataSeedOutcome {
            result: SeedingResult::AlreadySeeded,
            student_count: existing.len(),
        }));
    }

    for (index, payload) in payloads.iter().enumerate() {
        students
            .create(payload)
            .await
            .map_err(|source| StartupSeedingError::Seeding { index, source })?;
    }

    info!(student_count = payloads.len(), "example data seeding applied");
    Ok(Some(ExampleDataSeedOutcome {
        result: SeedingResult::Applied,
        student_count: payloads.len(),
    }))
}

fn parse_payloads(contents: &str) -> Result<Vec<Value>, StartupSeedingError> {
    match serde_json::from_str::<Value>(contents)? {
        Value::Array(items) => Ok(items),
        _ => Err(StartupSeedingError::NotAnArray),
    }
}

fn load_fixture(path: &Path) -> Result<String, StartupSeedingError> {
    let read_error = |source: std::io::Error| StartupSeedingError::FixtureRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "fixture path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    dir.read_to_string(Path::new(file_name)).map_err(read_error)
}
