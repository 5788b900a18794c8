//! In-memory roster API for testing.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::traits::RosterApi;
use crate::error::{Result, RosterError};
use crate::types::{NewStudent, Student, StudentId};

/// Mock API for testing.
///
/// Keeps the collection in memory and can be switched offline to exercise
/// failure paths.
pub struct MockApi {
    students: Mutex<Vec<Student>>,
    available: AtomicBool,
    next_id: AtomicU32,
    call_count: AtomicU32,
}

impl MockApi {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self {
            students: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            next_id: AtomicU32::new(1),
            call_count: AtomicU32::new(0),
        }
    }

    /// Seed the stored collection.
    pub fn with_students(self, students: Vec<Student>) -> Self {
        Self {
            students: Mutex::new(students),
            ..self
        }
    }

    /// Set availability.
    pub fn with_available(self, available: bool) -> Self {
        self.available.store(available, Ordering::SeqCst);
        self
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of remote calls made so far, failed ones included.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Snapshot of the stored collection.
    pub async fn stored(&self) -> Vec<Student> {
        self.students.lock().await.clone()
    }

    fn begin_call(&self) -> Result<()> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if !self.available.load(Ordering::SeqCst) {
            return Err(RosterError::Server {
                status: 503,
                message: "Mock API offline".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RosterApi for MockApi {
    async fn list_students(&self) -> Result<Vec<Student>> {
        self.begin_call()?;
        Ok(self.students.lock().await.clone())
    }

    async fn create_student(&self, input: &NewStudent) -> Result<Student> {
        self.begin_call()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let student = Student {
            id: StudentId::new(format!("mock-{id}")),
            name: input.name.clone(),
            age: input.age,
            address: input.address.clone(),
            grade: input.grade,
            avatar: input.avatar.clone(),
            created_at: Some(Utc::now()),
        };
        self.students.lock().await.push(student.clone());
        Ok(student)
    }

    async fn update_student(&self, student: &Student) -> Result<()> {
        self.begin_call()?;
        let mut students = self.students.lock().await;
        let slot = students
            .iter_mut()
            .find(|s| s.id == student.id)
            .ok_or_else(|| RosterError::NotFound(student.id.to_string()))?;
        *slot = student.clone();
        Ok(())
    }

    async fn delete_student(&self, id: &StudentId) -> Result<()> {
        self.begin_call()?;
        let mut students = self.students.lock().await;
        let before = students.len();
        students.retain(|s| &s.id != id);
        if students.len() == before {
            return Err(RosterError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
