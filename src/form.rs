//! Record entry form
//!
//! Holds the five editable fields of a new student and submits them as a
//! single create request. The form never touches the collection state;
//! callers that keep a `RosterState` dispatch `Action::Created` themselves
//! (see `RosterSession::create`).

use tracing::{error, info};

use crate::api::RosterApi;
use crate::error::{Result, RosterError};
use crate::types::{parse_count, NewStudent, Student};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryForm {
    pub name: String,
    pub age: String,
    pub address: String,
    pub grade: String,
    /// Optional avatar image URL
    pub avatar: String,
    submitting: bool,
}

impl EntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a create request is in flight
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn button_label(&self) -> &'static str {
        if self.submitting {
            "Submitting..."
        } else {
            "Submit"
        }
    }

    /// Check required fields and build the request body.
    pub fn validate(&self) -> Result<NewStudent> {
        for (field, value) in [
            ("name", &self.name),
            ("age", &self.age),
            ("address", &self.address),
            ("grade", &self.grade),
        ] {
            if value.trim().is_empty() {
                return Err(RosterError::Validation(format!("{field} is required")));
            }
        }

        Ok(NewStudent {
            name: self.name.clone(),
            age: parse_count("age", &self.age)?,
            address: self.address.clone(),
            grade: parse_count("grade", &self.grade)?,
            avatar: self.avatar.clone(),
        })
    }

    /// Submit the form.
    ///
    /// Fields are cleared only when the server accepts the record; on failure
    /// the user's input is kept as typed.
    pub async fn submit<A: RosterApi + ?Sized>(&mut self, api: &A) -> Result<Student> {
        let input = self.validate()?;

        let result = {
            let _busy = Submitting::start(&mut self.submitting);
            api.create_student(&input).await
        };

        match result {
            Ok(student) => {
                info!(id = %student.id, name = %student.name, "Student added");
                self.clear();
                Ok(student)
            }
            Err(e) => {
                error!(error = %e, "Failed to add student");
                Err(e)
            }
        }
    }

    fn clear(&mut self) {
        self.name.clear();
        self.age.clear();
        self.address.clear();
        self.grade.clear();
        self.avatar.clear();
    }
}

/// Holds the busy flag for one request; cleared on drop, so an abandoned
/// submit does not leave the form stuck.
struct Submitting<'a>(&'a mut bool);

impl<'a> Submitting<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for Submitting<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
