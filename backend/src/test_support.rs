//! Test utilities for the student records crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and when the `test-support` feature is enabled.

use serde_json::{Value, json};

/// A complete, valid creation payload for a student called `name`.
///
/// # Examples
///
/// ```rust
/// use student_records::domain::validate_create;
/// use student_records::test_support::student_payload;
///
/// let draft = validate_create(&student_payload("Mona Adel")).expect("valid payload");
/// assert_eq!(draft.profile.name, "Mona Adel");
/// ```
#[must_use]
pub fn student_payload(name: &str) -> Value {
    json!({
        "name": name,
        "address": "12 Nile Street",
        "nationalId": "12345678901234",
        "email": "student@example.com",
        "birthDate": "23/01/2008",
        "phone": "01012345678",
        "govern": "Assiut",
        "religion": "Muslim",
        "gender": "Male",
        "parent": {
            "name": "Ahmed Maged",
            "employee": "Engineer",
            "nationalId": "23456789012345",
            "studentRelation": "Father",
            "address": "12 Nile Street"
        },
        "military": {
            "number": "111/222/333",
            "postNumber": "123",
            "postDate": "23/01/2021",
            "status": "Deferred",
            "wantedYear": "25",
            "lastPostYear": "2027",
            "militaryNotes": "none"
        },
        "previousEducation": {
            "education": "Industrial diploma",
            "gradYear": "2017/2018"
        },
        "recentEducation": {
            "divisionName": "Artificial Intelligence",
            "divisionId": 101,
            "status": "New",
            "level": "First",
            "term": "First"
        }
    })
}

/// Remove a top-level or nested key from a payload.
///
/// `path` is a JSON pointer such as `/military` or `/parent/name`.
///
/// # Panics
///
/// Panics when the parent of `path` is not an object.
pub fn without(mut payload: Value, path: &str) -> Value {
    let (parent, key) = path.rsplit_once('/').unwrap_or(("", path));
    let target = if parent.is_empty() {
        &mut payload
    } else {
        payload
            .pointer_mut(parent)
            .unwrap_or_else(|| panic!("no value at {parent}"))
    };
    target
        .as_object_mut()
        .unwrap_or_else(|| panic!("{parent} is not an object"))
        .remove(key);
    payload
}

/// Write `contents` to a temporary file that is removed when dropped.
///
/// # Errors
///
/// Propagates I/O failures from creating or writing the file.
pub fn temp_fixture(contents: &str) -> std::io::Result<tempfile::NamedTempFile> {
    use std::io::Write;

    let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}
