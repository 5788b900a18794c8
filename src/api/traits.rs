//! Core trait for the roster API.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{NewStudent, Student, StudentId};

/// Remote operations on the student collection.
///
/// Implementations report transport and server failures as errors; callers
/// decide how to surface them.
#[async_trait]
pub trait RosterApi: Send + Sync {
    /// `GET /api/students`
    async fn list_students(&self) -> Result<Vec<Student>>;

    /// `POST /api/students`
    async fn create_student(&self, input: &NewStudent) -> Result<Student>;

    /// `PUT /api/students/{id}` with the full record. Only the status is
    /// checked; the response body is not relied on.
    async fn update_student(&self, student: &Student) -> Result<()>;

    /// `DELETE /api/students/{id}`
    async fn delete_student(&self, id: &StudentId) -> Result<()>;
}
