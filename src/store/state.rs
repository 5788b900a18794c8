//! Roster state container
//!
//! `RosterState` is the single source of truth for the collection view. The
//! visible (filtered) set is never stored; it is derived from the canonical
//! records and the current query on every read.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use super::reducer::filter_records;
use crate::error::Result;
use crate::types::{parse_count, Student, StudentId};

/// Identifies one remote call so superseded completions can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Editable fields of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Age,
    Address,
    Grade,
    Avatar,
}

/// Working copy of one record while the edit overlay is open.
///
/// Every field is held as typed text; numbers are only parsed on save.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub id: StudentId,
    pub name: String,
    pub age: String,
    pub address: String,
    pub grade: String,
    pub avatar: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Draft {
    pub fn from_student(student: &Student) -> Self {
        Self {
            id: student.id.clone(),
            name: student.name.clone(),
            age: student.age.to_string(),
            address: student.address.clone(),
            grade: student.grade.to_string(),
            avatar: student.avatar.clone(),
            created_at: student.created_at,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.name = value,
            DraftField::Age => self.age = value,
            DraftField::Address => self.address = value,
            DraftField::Grade => self.grade = value,
            DraftField::Avatar => self.avatar = value,
        }
    }

    /// Avatar URL to preview, if one has been typed
    pub fn avatar_preview(&self) -> Option<&str> {
        if self.avatar.is_empty() {
            None
        } else {
            Some(&self.avatar)
        }
    }

    /// Full record payload for the update request
    pub fn to_student(&self) -> Result<Student> {
        Ok(Student {
            id: self.id.clone(),
            name: self.name.clone(),
            age: parse_count("age", &self.age)?,
            address: self.address.clone(),
            grade: parse_count("grade", &self.grade)?,
            avatar: self.avatar.clone(),
            created_at: self.created_at,
        })
    }
}

/// Edit workflow state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState {
    /// No draft open
    #[default]
    Idle,
    /// Draft open; `saving` holds the token of an in-flight save
    Editing {
        draft: Draft,
        saving: Option<RequestToken>,
    },
}

/// State of the collection view
#[derive(Debug, Clone, Default)]
pub struct RosterState {
    pub(super) records: Vec<Student>,
    pub(super) query: String,
    pub(super) loading: bool,
    pub(super) edit: EditState,
    pub(super) error: Option<String>,
    pub(super) latest_load: Option<RequestToken>,
    /// Latest write (save or delete) issued per record
    pub(super) latest_write: HashMap<StudentId, RequestToken>,
}

impl RosterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical records, newest first
    pub fn records(&self) -> &[Student] {
        &self.records
    }

    /// Records matching the current query
    pub fn visible(&self) -> Vec<&Student> {
        filter_records(&self.records, &self.query)
    }

    pub fn find(&self, id: &StudentId) -> Option<&Student> {
        self.records.iter().find(|s| &s.id == id)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn edit(&self) -> &EditState {
        &self.edit
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.edit {
            EditState::Editing { draft, .. } => Some(draft),
            EditState::Idle => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.edit, EditState::Editing { .. })
    }

    /// Last error to show the user
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a write for this record is still outstanding
    pub fn has_pending_write(&self, id: &StudentId) -> bool {
        self.latest_write.contains_key(id)
    }
}
