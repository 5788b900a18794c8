//! Discrete state transitions for the collection view

use super::state::{DraftField, RequestToken};
use crate::types::{Student, StudentId};

/// Everything that can change a `RosterState`.
///
/// `*Started` actions are dispatched before a remote call is made; the
/// matching `*Succeeded`/`*Failed` action carries the same token.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadStarted {
        token: RequestToken,
    },
    LoadSucceeded {
        token: RequestToken,
        students: Vec<Student>,
    },
    LoadFailed {
        token: RequestToken,
        error: String,
    },

    /// Replace the search query
    Filter {
        query: String,
    },

    /// A record was created through the entry form
    Created {
        student: Student,
    },

    DeleteStarted {
        token: RequestToken,
        id: StudentId,
    },
    DeleteSucceeded {
        token: RequestToken,
        id: StudentId,
    },
    DeleteFailed {
        token: RequestToken,
        id: StudentId,
        error: String,
    },

    /// Open the edit overlay on a copy of the record
    BeginEdit {
        id: StudentId,
    },
    EditField {
        field: DraftField,
        value: String,
    },
    SaveStarted {
        token: RequestToken,
    },
    /// `student` is the saved draft, not the server's echo
    SaveSucceeded {
        token: RequestToken,
        student: Student,
    },
    SaveFailed {
        token: RequestToken,
        error: String,
    },
    CancelEdit,

    /// An operation was refused locally before any request was sent
    Rejected {
        error: String,
    },
    DismissError,
}
