//! Types for the roster API

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::{Result, RosterError};

/// Avatar shown when a record has none
pub const DEFAULT_AVATAR_URL: &str = "https://example.com/default-avatar.jpg";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the roster API (without the `/api/students` suffix)
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Server-assigned student identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StudentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A student record as stored by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Server-assigned identifier
    #[serde(rename = "_id")]
    pub id: StudentId,
    pub name: String,
    #[serde(deserialize_with = "deserialize_count")]
    pub age: u32,
    pub address: String,
    #[serde(deserialize_with = "deserialize_count")]
    pub grade: u32,
    /// Avatar URL, empty when unset
    #[serde(default, deserialize_with = "deserialize_text_or_null")]
    pub avatar: String,
    /// Creation time, used for ordering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Student {
    /// Avatar to display, falling back to the default image
    pub fn avatar_url(&self) -> &str {
        if self.avatar.is_empty() {
            DEFAULT_AVATAR_URL
        } else {
            &self.avatar
        }
    }

    /// Creation time as shown to users
    pub fn created_at_display(&self) -> String {
        match self.created_at {
            Some(ts) => ts.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => "Unknown".to_string(),
        }
    }
}

/// Request body for creating a student
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStudent {
    pub name: String,
    pub age: u32,
    pub address: String,
    pub grade: u32,
    pub avatar: String,
}

/// Parse a numeric field typed as text (age, grade)
pub fn parse_count(field: &str, text: &str) -> Result<u32> {
    text.trim()
        .parse()
        .map_err(|_| RosterError::Validation(format!("{field} must be a whole number, got {text:?}")))
}

/// Accepts `12`, `12.0` or `"12"`. Older records carry the raw form text.
fn deserialize_count<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => u32::try_from(n).map_err(de::Error::custom),
        Raw::Float(f) if f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) => Ok(f as u32),
        Raw::Float(f) => Err(de::Error::custom(format!("not a whole number: {f}"))),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("not a number: {s:?}"))),
    }
}

fn deserialize_text_or_null<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_from_server_json() {
        let json = r#"{
            "_id": "665f1c",
            "name": "Ann",
            "age": 12,
            "address": "1 Main St",
            "grade": 6,
            "avatar": "https://img.example.com/ann.png",
            "createdAt": "2024-05-01T10:00:00.000Z",
            "__v": 0
        }"#;

        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.id.as_str(), "665f1c");
        assert_eq!(student.age, 12);
        assert_eq!(student.grade, 6);
        assert!(student.created_at.is_some());
        assert_eq!(student.avatar_url(), "https://img.example.com/ann.png");
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let json = r#"{"_id": "a", "name": "Bob", "age": "14", "address": "x", "grade": " 8 "}"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.age, 14);
        assert_eq!(student.grade, 8);
        assert_eq!(student.avatar, "");
        assert_eq!(student.avatar_url(), DEFAULT_AVATAR_URL);
        assert_eq!(student.created_at_display(), "Unknown");
    }

    #[test]
    fn test_null_avatar_and_whole_floats() {
        let json = r#"{"_id": "a", "name": "Cy", "age": 9.0, "address": "x", "grade": 3, "avatar": null}"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.age, 9);
        assert_eq!(student.avatar, "");
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        for age in [r#""ten""#, "-3", "2.5"] {
            let json = format!(r#"{{"_id": "a", "name": "x", "age": {age}, "address": "x", "grade": 1}}"#);
            assert!(serde_json::from_str::<Student>(&json).is_err(), "age {age} should fail");
        }
    }

    #[test]
    fn test_serialized_wire_names() {
        let json = r#"{"_id": "a", "name": "Ann", "age": 12, "address": "x", "grade": 6, "createdAt": "2024-05-01T10:00:00Z"}"#;
        let student: Student = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&student).unwrap();
        assert_eq!(value["_id"], "a");
        assert_eq!(value["age"], 12);
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("age", " 15 ").unwrap(), 15);
        assert!(matches!(parse_count("age", ""), Err(RosterError::Validation(_))));
        assert!(matches!(parse_count("grade", "A"), Err(RosterError::Validation(_))));
    }
}
