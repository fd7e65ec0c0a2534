//! Declarative definition of student record sections.
//!
//! A section is a group of named fields that appears in the JSON
//! representation of a student: the top-level profile scalars and each of the
//! nested value objects. [`define_record_section!`] generates the value type,
//! its partial-update counterpart, and the readers the entity schema uses to
//! validate untyped payloads field by field.

use serde_json::{Map, Value};

use super::student_schema::{ExpectedType, SchemaError};

/// Field types a record section may declare.
pub(crate) trait FieldType: Sized {
    /// Type reported when a payload supplies a mismatched value.
    const EXPECTED: ExpectedType;

    /// Read and normalise a JSON value, or `None` when the type mismatches.
    fn from_json(value: &Value) -> Option<Self>;
}

impl FieldType for String {
    const EXPECTED: ExpectedType = ExpectedType::Text;

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FieldType for i64 {
    const EXPECTED: ExpectedType = ExpectedType::Integer;

    // Numeric strings are accepted and coerced; clients built against the
    // original service post form values as strings.
    fn from_json(value: &Value) -> Option<Self> {
        value
            .as_i64()
            .or_else(|| value.as_str().and_then(|raw| raw.trim().parse().ok()))
    }
}

/// Join a section prefix and a field name into a dotted path.
pub(crate) fn field_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Read a field that must be present with the declared type.
pub(crate) fn require_field<T: FieldType>(
    object: &Map<String, Value>,
    prefix: &str,
    name: &str,
) -> Result<T, SchemaError> {
    match object.get(name) {
        None => Err(SchemaError::missing(field_path(prefix, name))),
        Some(value) => T::from_json(value)
            .ok_or_else(|| SchemaError::invalid_type(field_path(prefix, name), T::EXPECTED)),
    }
}

/// Read a field that may be absent but must match its type when present.
pub(crate) fn optional_field<T: FieldType>(
    object: &Map<String, Value>,
    prefix: &str,
    name: &str,
) -> Result<Option<T>, SchemaError> {
    object
        .get(name)
        .map(|value| {
            T::from_json(value)
                .ok_or_else(|| SchemaError::invalid_type(field_path(prefix, name), T::EXPECTED))
        })
        .transpose()
}

/// Generate a record section value type and its patch type.
///
/// Each field is declared as `ident: Type => "jsonName"`. The JSON names must
/// match serde's camelCase rendering of the identifiers; the unit tests of
/// `domain::student` assert this for every section.
macro_rules! define_record_section {
    (
        $(#[$meta:meta])*
        pub struct $name:ident / $patch:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty => $json:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        #[doc = concat!("Partial update for [`", stringify!($name), "`]. Absent fields are `None`.")]
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $patch {
            $(
                #[doc = concat!("New `", $json, "`, when supplied.")]
                pub $field: Option<$ty>,
            )*
        }

        impl $name {
            /// JSON field names in declaration order.
            pub const FIELDS: &'static [&'static str] = &[$($json),*];

            pub(crate) fn from_object(
                object: &::serde_json::Map<String, ::serde_json::Value>,
                prefix: &str,
            ) -> Result<Self, $crate::domain::SchemaError> {
                Ok(Self {
                    $(
                        $field: $crate::domain::record_section::require_field(
                            object, prefix, $json,
                        )?,
                    )*
                })
            }
        }

        impl $patch {
            pub(crate) fn from_object(
                object: &::serde_json::Map<String, ::serde_json::Value>,
                prefix: &str,
            ) -> Result<Self, $crate::domain::SchemaError> {
                Ok(Self {
                    $(
                        $field: $crate::domain::record_section::optional_field(
                            object, prefix, $json,
                        )?,
                    )*
                })
            }

            /// Build a complete value; omitted fields take their defaults.
            #[must_use]
            pub fn into_replacement(self) -> $name {
                $name {
                    $( $field: self.$field.unwrap_or_default(), )*
                }
            }

            /// Overlay the supplied fields onto `base`.
            #[must_use]
            pub fn merge_onto(self, base: $name) -> $name {
                $name {
                    $( $field: self.$field.unwrap_or(base.$field), )*
                }
            }

            /// Whether the patch supplies no fields at all.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )*
            }
        }
    };
}

pub(crate) use define_record_section;
