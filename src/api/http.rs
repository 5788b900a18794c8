//! HTTP client for the roster API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use tracing::{debug, warn};

use super::traits::RosterApi;
use crate::error::{Result, RosterError};
use crate::types::{ClientConfig, NewStudent, Student, StudentId};

/// HTTP client for the roster API
///
/// # Example
///
/// ```rust,no_run
/// use student_roster::{ClientConfig, RosterApi, RosterClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RosterClient::new(ClientConfig {
///     base_url: "http://localhost:5000".into(),
///     ..Default::default()
/// })?;
///
/// let students = client.list_students().await?;
/// # Ok(())
/// # }
/// ```
pub struct RosterClient {
    config: ClientConfig,
    client: Client,
}

impl RosterClient {
    /// Create a new roster client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/api/students", self.config.base_url.trim_end_matches('/'))
    }

    fn student_url(&self, id: &StudentId) -> String {
        format!(
            "{}/{}",
            self.collection_url(),
            urlencoding::encode(id.as_str())
        )
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let response = Self::check_status(response).await?;
        let body = response.json().await?;
        Ok(body)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(RosterError::NotFound(response.url().path().to_string()));
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RosterError::Server {
                status,
                message: body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl RosterApi for RosterClient {
    async fn list_students(&self) -> Result<Vec<Student>> {
        let url = self.collection_url();
        debug!(%url, "Fetching students");

        let response = self.client.get(&url).send().await?;
        let raw: Vec<serde_json::Value> = self.handle_response(response).await?;
        Ok(decode_students(raw))
    }

    async fn create_student(&self, input: &NewStudent) -> Result<Student> {
        let url = self.collection_url();
        debug!(%url, name = %input.name, "Creating student");

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(input)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn update_student(&self, student: &Student) -> Result<()> {
        let url = self.student_url(&student.id);
        debug!(%url, "Updating student");

        let response = self
            .client
            .put(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(student)
            .send()
            .await?;

        // Servers reply with the record, a message or nothing at all
        Self::check_status(response).await?;
        Ok(())
    }

    async fn delete_student(&self, id: &StudentId) -> Result<()> {
        let url = self.student_url(id);
        debug!(%url, "Deleting student");

        let response = self.client.delete(&url).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }
}

/// Decode each record on its own so one malformed entry cannot hide the rest.
fn decode_students(raw: Vec<serde_json::Value>) -> Vec<Student> {
    raw.into_iter()
        .filter_map(|value| {
            let id = value.get("_id").cloned();
            match serde_json::from_value::<Student>(value) {
                Ok(student) => Some(student),
                Err(e) => {
                    warn!(id = ?id, error = %e, "Skipping malformed student record");
                    None
                }
            }
        })
        .collect()
}
