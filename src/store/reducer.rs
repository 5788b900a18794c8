//! Pure transition function for `RosterState`

use tracing::debug;

use super::action::Action;
use super::state::{Draft, EditState, RosterState};
use crate::types::Student;

/// Records whose name contains `query` (case-sensitive, untrimmed), in
/// canonical order. An empty query matches everything.
pub fn filter_records<'a>(records: &'a [Student], query: &str) -> Vec<&'a Student> {
    records.iter().filter(|s| s.name.contains(query)).collect()
}

/// Newest first; records without a creation time go last.
pub fn sort_records(records: &mut [Student]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Apply one action to the state.
pub fn reduce(mut state: RosterState, action: Action) -> RosterState {
    match action {
        // ==================== Load ====================
        Action::LoadStarted { token } => {
            state.loading = true;
            state.latest_load = Some(token);
        }
        Action::LoadSucceeded { token, mut students } => {
            if state.latest_load != Some(token) {
                debug!(%token, "Dropping superseded load");
                return state;
            }
            sort_records(&mut students);
            state.records = students;
            state.loading = false;
            state.error = None;
        }
        Action::LoadFailed { token, error } => {
            if state.latest_load != Some(token) {
                debug!(%token, "Dropping superseded load failure");
                return state;
            }
            state.loading = false;
            state.error = Some(error);
        }

        // ==================== Filter / create ====================
        Action::Filter { query } => {
            state.query = query;
        }
        Action::Created { student } => {
            if state.find(&student.id).is_none() {
                state.records.push(student);
                sort_records(&mut state.records);
            }
        }

        // ==================== Delete ====================
        Action::DeleteStarted { token, id } => {
            state.latest_write.insert(id, token);
        }
        Action::DeleteSucceeded { token, id } => {
            // The server no longer has the record, so drop it even if a newer
            // write was issued after this delete.
            state.records.retain(|s| s.id != id);
            if state.latest_write.get(&id) == Some(&token) {
                state.latest_write.remove(&id);
            }
        }
        Action::DeleteFailed { token, id, error } => {
            if state.latest_write.get(&id) == Some(&token) {
                state.latest_write.remove(&id);
            }
            state.error = Some(error);
        }

        // ==================== Edit ====================
        Action::BeginEdit { id } => {
            if let Some(draft) = state.find(&id).map(Draft::from_student) {
                state.edit = EditState::Editing {
                    draft,
                    saving: None,
                };
            }
        }
        Action::EditField { field, value } => {
            if let EditState::Editing { draft, .. } = &mut state.edit {
                draft.set(field, value);
            }
        }
        Action::SaveStarted { token } => {
            if let EditState::Editing { draft, saving } = &mut state.edit {
                *saving = Some(token);
                state.latest_write.insert(draft.id.clone(), token);
            }
        }
        Action::SaveSucceeded { token, student } => {
            if state.latest_write.get(&student.id) != Some(&token) {
                debug!(%token, id = %student.id, "Dropping superseded save");
                if let EditState::Editing { saving, .. } = &mut state.edit {
                    if *saving == Some(token) {
                        *saving = None;
                    }
                }
                return state;
            }
            state.latest_write.remove(&student.id);
            if let Some(slot) = state.records.iter_mut().find(|s| s.id == student.id) {
                *slot = student;
            }
            if matches!(state.edit, EditState::Editing { saving: Some(t), .. } if t == token) {
                state.edit = EditState::Idle;
            }
        }
        Action::SaveFailed { token, error } => {
            if let EditState::Editing { draft, saving } = &mut state.edit {
                if *saving == Some(token) {
                    *saving = None;
                }
                if state.latest_write.get(&draft.id) == Some(&token) {
                    state.latest_write.remove(&draft.id);
                }
            }
            state.error = Some(error);
        }
        Action::CancelEdit => {
            state.edit = EditState::Idle;
        }

        Action::Rejected { error } => {
            state.error = Some(error);
        }
        Action::DismissError => {
            state.error = None;
        }
    }

    state
}
