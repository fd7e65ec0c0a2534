//! Student record model.
//!
//! A [`Student`] is an identifier plus a [`StudentDraft`]: the profile
//! scalars and four nested value objects owned exclusively by the record.
//! Partial updates are expressed as a [`StudentPatch`] and applied with
//! [`Student::apply`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::record_section::define_record_section;

/// Validation errors for [`StudentId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentIdError {
    /// The raw value is not a base-10 integer.
    NotAnInteger {
        /// Rejected input.
        raw: String,
    },
    /// The value is zero or negative.
    NotPositive {
        /// Rejected value.
        value: i64,
    },
}

impl fmt::Display for StudentIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnInteger { raw } => write!(f, "student id must be an integer, got {raw:?}"),
            Self::NotPositive { value } => {
                write!(f, "student id must be a positive integer, got {value}")
            }
        }
    }
}

impl std::error::Error for StudentIdError {}

/// Unique, immutable student identifier.
///
/// ## Invariants
/// - Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct StudentId(i64);

impl StudentId {
    /// Validate and construct a [`StudentId`].
    ///
    /// # Examples
    /// ```
    /// use student_records::domain::StudentId;
    ///
    /// assert_eq!(StudentId::new(3).expect("positive").get(), 3);
    /// assert!(StudentId::new(0).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, StudentIdError> {
        if value < 1 {
            return Err(StudentIdError::NotPositive { value });
        }
        Ok(Self(value))
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StudentId {
    type Err = StudentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<i64>().map_err(|_| StudentIdError::NotAnInteger {
            raw: s.to_owned(),
        })?;
        Self::new(value)
    }
}

impl TryFrom<i64> for StudentId {
    type Error = StudentIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StudentId> for i64 {
    fn from(value: StudentId) -> Self {
        value.0
    }
}

define_record_section! {
    /// Top-level personal details of a student.
    ///
    /// `birth_date` is kept as supplied (`DD/MM/YYYY` by convention).
    pub struct StudentProfile / StudentProfilePatch {
        /// Full name.
        name: String => "name",
        /// Home address.
        address: String => "address",
        /// National identity number.
        national_id: String => "nationalId",
        /// Contact e-mail.
        email: String => "email",
        /// Date of birth.
        birth_date: String => "birthDate",
        /// Contact phone.
        phone: String => "phone",
        /// Governorate of residence.
        govern: String => "govern",
        /// Religion.
        religion: String => "religion",
        /// Gender.
        gender: String => "gender",
    }
}

define_record_section! {
    /// Parent or guardian of a student.
    pub struct Parent / ParentPatch {
        /// Full name.
        name: String => "name",
        /// Occupation.
        employee: String => "employee",
        /// National identity number.
        national_id: String => "nationalId",
        /// Relation to the student, e.g. father.
        student_relation: String => "studentRelation",
        /// Home address.
        address: String => "address",
    }
}

define_record_section! {
    /// Military service status.
    pub struct MilitaryStatus / MilitaryStatusPatch {
        number: String => "number",
        post_number: String => "postNumber",
        post_date: String => "postDate",
        /// Opaque status text; not interpreted.
        status: String => "status",
        wanted_year: String => "wantedYear",
        last_post_year: String => "lastPostYear",
        military_notes: String => "militaryNotes",
    }
}

define_record_section! {
    /// Education completed before enrollment.
    pub struct PreviousEducation / PreviousEducationPatch {
        education: String => "education",
        /// Graduation year, e.g. `2017/2018`.
        grad_year: String => "gradYear",
    }
}

define_record_section! {
    /// Current enrollment.
    pub struct RecentEducation / RecentEducationPatch {
        division_name: String => "divisionName",
        division_id: i64 => "divisionId",
        /// Opaque status text; not interpreted.
        status: String => "status",
        level: String => "level",
        term: String => "term",
    }
}

/// How nested objects in a patch combine with the stored record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NestedMergePolicy {
    /// A supplied nested object replaces the stored one as a whole; fields it
    /// omits take their defaults.
    #[default]
    Replace,
    /// A supplied nested object overlays the stored one field by field.
    Deep,
}

impl NestedMergePolicy {
    /// Configuration spelling of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Deep => "deep",
        }
    }
}

impl fmt::Display for NestedMergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown merge policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown nested merge policy {0:?}; expected \"replace\" or \"deep\"")]
pub struct UnknownMergePolicy(pub String);

impl FromStr for NestedMergePolicy {
    type Err = UnknownMergePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "deep" => Ok(Self::Deep),
            _ => Err(UnknownMergePolicy(s.to_owned())),
        }
    }
}

macro_rules! apply_nested {
    ($patch:expr, $base:expr, $policy:expr) => {
        match ($patch, $policy) {
            (None, _) => $base,
            (Some(patch), NestedMergePolicy::Replace) => patch.into_replacement(),
            (Some(patch), NestedMergePolicy::Deep) => patch.merge_onto($base),
        }
    };
}

/// A complete student record without an identifier.
///
/// Produced by [`crate::domain::validate_create`] and handed to the storage
/// port, which assigns the identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    /// Top-level scalar fields.
    #[serde(flatten)]
    pub profile: StudentProfile,
    /// Parent or guardian.
    pub parent: Parent,
    /// Military service status.
    pub military: MilitaryStatus,
    /// Education before enrollment.
    pub previous_education: PreviousEducation,
    /// Current enrollment.
    pub recent_education: RecentEducation,
}

/// Partial update of a student record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    /// Top-level scalars to overwrite.
    pub profile: StudentProfilePatch,
    /// Replacement or overlay for `parent`.
    pub parent: Option<ParentPatch>,
    /// Replacement or overlay for `military`.
    pub military: Option<MilitaryStatusPatch>,
    /// Replacement or overlay for `previousEducation`.
    pub previous_education: Option<PreviousEducationPatch>,
    /// Replacement or overlay for `recentEducation`.
    pub recent_education: Option<RecentEducationPatch>,
}

impl StudentPatch {
    /// Whether applying the patch leaves any record unchanged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profile.is_empty()
            && self.parent.is_none()
            && self.military.is_none()
            && self.previous_education.is_none()
            && self.recent_education.is_none()
    }
}

/// A stored student record.
///
/// # Examples
/// ```
/// use student_records::domain::{Student, StudentDraft, StudentId};
///
/// let id = StudentId::new(1).expect("positive id");
/// let student = Student::new(id, StudentDraft::default());
/// let json = serde_json::to_value(&student).expect("serialise");
/// assert_eq!(json["id"], 1);
/// assert!(json["parent"].is_object());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    id: StudentId,
    #[serde(flatten)]
    record: StudentDraft,
}

impl Student {
    /// Attach an identifier to a validated draft.
    #[must_use]
    pub fn new(id: StudentId, record: StudentDraft) -> Self {
        Self { id, record }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> StudentId {
        self.id
    }

    /// Record content without the identifier.
    #[must_use]
    pub fn record(&self) -> &StudentDraft {
        &self.record
    }

    /// Apply a partial update.
    ///
    /// Profile scalars are merged field by field. Nested objects follow
    /// `policy`; the identifier never changes.
    #[must_use]
    pub fn apply(self, patch: StudentPatch, policy: NestedMergePolicy) -> Self {
        let Self { id, record } = self;
        let StudentDraft {
            profile,
            parent,
            military,
            previous_education,
            recent_education,
        } = record;

        Self {
            id,
            record: StudentDraft {
                profile: patch.profile.merge_onto(profile),
                parent: apply_nested!(patch.parent, parent, policy),
                military: apply_nested!(patch.military, military, policy),
                previous_education: apply_nested!(
                    patch.previous_education,
                    previous_education,
                    policy
                ),
                recent_education: apply_nested!(patch.recent_education, recent_education, policy),
            },
        }
    }
}

#[cfg(test)]
#[path = "student_tests.rs"]
mod tests;
