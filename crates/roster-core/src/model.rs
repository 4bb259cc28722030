//! Core data model types for roster.
//!
//! These types are serialized directly into the two store files, so their
//! field names are part of the on-disk format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single student entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Externally assigned identifier, unique within a repository.
    pub id: String,
    pub name: String,
    pub course: String,
    /// Whole-number marks. No range is enforced.
    pub marks: i64,
}

impl Student {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        course: impl Into<String>,
        marks: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            course: course.into(),
            marks,
        }
    }

    /// Apply every field present in `patch`, keeping the rest.
    pub fn apply(&mut self, patch: StudentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(course) = patch.course {
            self.course = course;
        }
        if let Some(marks) = patch.marks {
            self.marks = marks;
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Course: {}, Marks: {}",
            self.id, self.name, self.course, self.marks
        )
    }
}

/// Field changes for an update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub course: Option<String>,
    pub marks: Option<i64>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.course.is_none() && self.marks.is_none()
    }
}

/// Contents of the admin store.
///
/// Serialized as `{"password": "<hex digest>"}`; an empty object means no
/// admin has been set up yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredential {
    #[serde(
        rename = "password",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub password_hash: Option<String>,
}
