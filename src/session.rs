//! Collection view session
//!
//! `RosterSession` runs the side effects behind each store action: it makes
//! the remote call through a `RosterApi`, tags it with a `RequestToken`, and
//! feeds the outcome back through `reduce`. Failures are logged and stored
//! in the state's error field, and also returned to the caller.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::api::RosterApi;
use crate::error::{Result, RosterError};
use crate::export::ExportDocument;
use crate::form::EntryForm;
use crate::store::{reduce, Action, DraftField, RequestToken, RosterState};
use crate::types::{Student, StudentId};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this student permanently?";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Fixed answer, for scripted use and tests
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

pub struct RosterSession<A: RosterApi> {
    api: A,
    state: RosterState,
    next_token: u64,
}

impl<A: RosterApi> RosterSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: RosterState::new(),
            next_token: 1,
        }
    }

    pub fn state(&self) -> &RosterState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state = reduce(std::mem::take(&mut self.state), action);
    }

    fn next_token(&mut self) -> RequestToken {
        let token = RequestToken::new(self.next_token);
        self.next_token += 1;
        token
    }

    /// Fetch the whole collection, newest first.
    pub async fn load(&mut self) -> Result<()> {
        let token = self.next_token();
        self.dispatch(Action::LoadStarted { token });

        match self.api.list_students().await {
            Ok(students) => {
                info!(count = students.len(), "Loaded students");
                self.dispatch(Action::LoadSucceeded { token, students });
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch students");
                self.dispatch(Action::LoadFailed {
                    token,
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.dispatch(Action::Filter {
            query: query.into(),
        });
    }

    pub fn visible(&self) -> Vec<&Student> {
        self.state.visible()
    }

    /// Submit the entry form and show the new record without a reload.
    pub async fn create(&mut self, form: &mut EntryForm) -> Result<Student> {
        let student = form.submit(&self.api).await?;
        self.dispatch(Action::Created {
            student: student.clone(),
        });
        Ok(student)
    }

    /// Delete after confirmation. Returns `false` if the user declined.
    pub async fn delete(&mut self, id: &StudentId, confirm: &dyn Confirm) -> Result<bool> {
        if !confirm.confirm(DELETE_PROMPT) {
            info!(%id, "Delete cancelled");
            return Ok(false);
        }

        let token = self.next_token();
        self.dispatch(Action::DeleteStarted {
            token,
            id: id.clone(),
        });

        match self.api.delete_student(id).await {
            Ok(()) => {
                info!(%id, "Deleted student");
                self.dispatch(Action::DeleteSucceeded {
                    token,
                    id: id.clone(),
                });
                Ok(true)
            }
            Err(e) => {
                error!(%id, error = %e, "Failed to delete student");
                self.dispatch(Action::DeleteFailed {
                    token,
                    id: id.clone(),
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Open a draft on the record.
    pub fn begin_edit(&mut self, id: &StudentId) -> Result<()> {
        if self.state.find(id).is_none() {
            return Err(RosterError::NotFound(id.to_string()));
        }
        self.dispatch(Action::BeginEdit { id: id.clone() });
        Ok(())
    }

    pub fn edit_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.dispatch(Action::EditField {
            field,
            value: value.into(),
        });
    }

    /// Commit the open draft. The draft stays open if the save fails.
    pub async fn save_edit(&mut self) -> Result<Student> {
        let draft = self
            .state
            .draft()
            .ok_or_else(|| RosterError::Validation("no edit in progress".to_string()))?;

        let student = match draft.to_student() {
            Ok(student) => student,
            Err(e) => {
                warn!(id = %draft.id, error = %e, "Draft rejected");
                self.dispatch(Action::Rejected {
                    error: e.to_string(),
                });
                return Err(e);
            }
        };

        let token = self.next_token();
        self.dispatch(Action::SaveStarted { token });

        match self.api.update_student(&student).await {
            Ok(()) => {
                info!(id = %student.id, "Updated student");
                self.dispatch(Action::SaveSucceeded {
                    token,
                    student: student.clone(),
                });
                Ok(student)
            }
            Err(e) => {
                error!(id = %student.id, error = %e, "Failed to update student");
                self.dispatch(Action::SaveFailed {
                    token,
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.dispatch(Action::CancelEdit);
    }

    pub fn dismiss_error(&mut self) {
        self.dispatch(Action::DismissError);
    }

    /// Write the record's document into `dir`.
    pub fn export(&self, id: &StudentId, dir: &Path) -> Result<PathBuf> {
        let student = self
            .state
            .find(id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))?;
        ExportDocument::from_student(student).write_to(dir)
    }
}
