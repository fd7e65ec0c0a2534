//! Entity schema validation for student payloads.
//!
//! Payloads arrive as untyped JSON. [`validate_create`] demands the complete
//! record shape and [`validate_patch`] accepts any subset of it; both check
//! every supplied field against its declared type and ignore fields the
//! schema does not declare, including a client-supplied `id`.

use std::fmt;

use serde_json::{Map, Value};

use super::record_section::field_path;
use super::student::{
    MilitaryStatus, MilitaryStatusPatch, Parent, ParentPatch, PreviousEducation,
    PreviousEducationPatch, RecentEducation, RecentEducationPatch, StudentDraft, StudentPatch,
    StudentProfile, StudentProfilePatch,
};

/// JSON key of the nested parent object.
pub const PARENT_KEY: &str = "parent";
/// JSON key of the nested military status object.
pub const MILITARY_KEY: &str = "military";
/// JSON key of the nested previous education object.
pub const PREVIOUS_EDUCATION_KEY: &str = "previousEducation";
/// JSON key of the nested recent education object.
pub const RECENT_EDUCATION_KEY: &str = "recentEducation";

/// Declared semantic type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedType {
    /// Free-text string.
    Text,
    /// Integer; numeric strings are coerced.
    Integer,
    /// Nested JSON object.
    Object,
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("a string"),
            Self::Integer => f.write_str("an integer"),
            Self::Object => f.write_str("an object"),
        }
    }
}

/// Validation failure naming the first offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The payload itself is not a JSON object.
    NotAnObject,
    /// A required field is absent.
    Missing {
        /// Dotted field path, e.g. `military.postDate`.
        path: String,
    },
    /// A field is present with the wrong type.
    InvalidType {
        /// Dotted field path.
        path: String,
        /// Type the schema declares for the field.
        expected: ExpectedType,
    },
}

impl SchemaError {
    /// Build a [`SchemaError::Missing`] for `path`.
    pub fn missing(path: impl Into<String>) -> Self {
        Self::Missing { path: path.into() }
    }

    /// Build a [`SchemaError::InvalidType`] for `path`.
    pub fn invalid_type(path: impl Into<String>, expected: ExpectedType) -> Self {
        Self::InvalidType {
            path: path.into(),
            expected,
        }
    }

    /// Offending field path, when the failure concerns a single field.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::NotAnObject => None,
            Self::Missing { path } | Self::InvalidType { path, .. } => Some(path.as_str()),
        }
    }

    /// Stable machine-readable code for adapters.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAnObject => "invalid_body",
            Self::Missing { .. } => "missing_field",
            Self::InvalidType { .. } => "invalid_type",
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("request body must be a JSON object"),
            Self::Missing { path } => write!(f, "missing required field: {path}"),
            Self::InvalidType { path, expected } => write!(f, "{path} must be {expected}"),
        }
    }
}

impl std::error::Error for SchemaError {}

fn root_object(payload: &Value) -> Result<&Map<String, Value>, SchemaError> {
    payload.as_object().ok_or(SchemaError::NotAnObject)
}

fn require_section<'a>(
    object: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a Map<String, Value>, SchemaError> {
    match object.get(key) {
        None => Err(SchemaError::missing(key)),
        Some(value) => value
            .as_object()
            .ok_or_else(|| SchemaError::invalid_type(key, ExpectedType::Object)),
    }
}

fn optional_section<'a>(
    object: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a Map<String, Value>>, SchemaError> {
    object
        .get(key)
        .map(|value| {
            value
                .as_object()
                .ok_or_else(|| SchemaError::invalid_type(field_path("", key), ExpectedType::Object))
        })
        .transpose()
}

/// Validate a creation payload and normalise it into a [`StudentDraft`].
///
/// Fields are checked in declaration order: the profile scalars, then
/// `parent`, `military`, `previousEducation` and `recentEducation`.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use student_records::domain::{validate_create, SchemaError};
///
/// let err = validate_create(&json!({ "name": 3 })).expect_err("name must be text");
/// assert_eq!(err.to_string(), "name must be a string");
/// ```
pub fn validate_create(payload: &Value) -> Result<StudentDraft, SchemaError> {
    let object = root_object(payload)?;
    let profile = StudentProfile::from_object(object, "")?;
    let parent = Parent::from_object(require_section(object, PARENT_KEY)?, PARENT_KEY)?;
    let military =
        MilitaryStatus::from_object(require_section(object, MILITARY_KEY)?, MILITARY_KEY)?;
    let previous_education = PreviousEducation::from_object(
        require_section(object, PREVIOUS_EDUCATION_KEY)?,
        PREVIOUS_EDUCATION_KEY,
    )?;
    let recent_education = RecentEducation::from_object(
        require_section(object, RECENT_EDUCATION_KEY)?,
        RECENT_EDUCATION_KEY,
    )?;

    Ok(StudentDraft {
        profile,
        parent,
        military,
        previous_education,
        recent_education,
    })
}

/// Validate a partial-update payload and normalise it into a
/// [`StudentPatch`].
pub fn validate_patch(payload: &Value) -> Result<StudentPatch, SchemaError> {
    let object = root_object(payload)?;
    let profile = StudentProfilePatch::from_object(object, "")?;
    let parent = optional_section(object, PARENT_KEY)?
        .map(|section| ParentPatch::from_object(section, PARENT_KEY))
        .transpose()?;
    let military = optional_section(object, MILITARY_KEY)?
        .map(|section| MilitaryStatusPatch::from_object(section, MILITARY_KEY))
        .transpose()?;
    let previous_education = optional_section(object, PREVIOUS_EDUCATION_KEY)?
        .map(|section| PreviousEducationPatch::from_object(section, PREVIOUS_EDUCATION_KEY))
        .transpose()?;
    let recent_education = optional_section(object, RECENT_EDUCATION_KEY)?
        .map(|section| RecentEducationPatch::from_object(section, RECENT_EDUCATION_KEY))
        .transpose()?;

    Ok(StudentPatch {
        profile,
        parent,
        military,
        previous_education,
        recent_education,
    })
}

#[cfg(test)]
#[path = "student_schema_tests.rs"]
mod tests;
