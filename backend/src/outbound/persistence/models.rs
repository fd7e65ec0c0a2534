//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions to and from domain types live
//! here so the repository only moves rows around.

use diesel::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{
    MilitaryStatus, Parent, PreviousEducation, RecentEducation, Student, StudentDraft, StudentId,
    StudentProfile,
};

use super::schema::students;

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Row struct for reading from the students table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub national_id: String,
    pub email: String,
    pub birth_date: String,
    pub phone: String,
    pub govern: String,
    pub religion: String,
    pub gender: String,
    pub parent: Value,
    pub military: Value,
    pub previous_education: Value,
    pub recent_education: Value,
}

/// Column values written on insert and on full-record update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentRecordRow {
    pub name: String,
    pub address: String,
    pub national_id: String,
    pub email: String,
    pub birth_date: String,
    pub phone: String,
    pub govern: String,
    pub religion: String,
    pub gender: String,
    pub parent: Value,
    pub military: Value,
    pub previous_education: Value,
    pub recent_education: Value,
}

fn decode<T: DeserializeOwned>(column: &'static str, value: Value) -> Result<T, BoxedError> {
    serde_json::from_value(value)
        .map_err(|err| format!("students.{column} holds malformed JSON: {err}").into())
}

fn encode<T: Serialize>(column: &'static str, value: &T) -> Result<Value, BoxedError> {
    serde_json::to_value(value)
        .map_err(|err| format!("students.{column} could not be encoded: {err}").into())
}

impl TryFrom<StudentRow> for Student {
    type Error = BoxedError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        let id = StudentId::new(row.id)?;
        let parent: Parent = decode("parent", row.parent)?;
        let military: MilitaryStatus = decode("military", row.military)?;
        let previous_education: PreviousEducation =
            decode("previous_education", row.previous_education)?;
        let recent_education: RecentEducation = decode("recent_education", row.recent_education)?;

        Ok(Student::new(
            id,
            StudentDraft {
                profile: StudentProfile {
                    name: row.name,
                    address: row.address,
                    national_id: row.national_id,
                    email: row.email,
                    birth_date: row.birth_date,
                    phone: row.phone,
                    govern: row.govern,
                    religion: row.religion,
                    gender: row.gender,
                },
                parent,
                military,
                previous_education,
                recent_education,
            },
        ))
    }
}

impl TryFrom<&StudentDraft> for StudentRecordRow {
    type Error = BoxedError;

    fn try_from(draft: &StudentDraft) -> Result<Self, Self::Error> {
        let profile = &draft.profile;
        Ok(Self {
            name: profile.name.clone(),
            address: profile.address.clone(),
            national_id: profile.national_id.clone(),
            email: profile.email.clone(),
            birth_date: profile.birth_date.clone(),
            phone: profile.phone.clone(),
            govern: profile.govern.clone(),
            religion: profile.religion.clone(),
            gender: profile.gender.clone(),
            parent: encode("parent", &draft.parent)?,
            military: encode("military", &draft.military)?,
            previous_education: encode("previous_education", &draft.previous_education)?,
            recent_education: encode("recent_education", &draft.recent_education)?,
        })
    }
}
