use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle assigned by the record store when a record is created.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        RecordId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId(id.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Course,
    Section,
    Lesson,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Course => write!(f, "course"),
            RecordKind::Section => write!(f, "section"),
            RecordKind::Lesson => write!(f, "lesson"),
        }
    }
}

/// Fields handed to the record store for a create.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRecord {
    pub kind: RecordKind,
    pub title: String,
    pub content: Option<String>,
    pub parent_id: Option<RecordId>,
}

impl NewRecord {
    pub fn course(title: &str, outline: &str) -> Self {
        NewRecord {
            kind: RecordKind::Course,
            title: title.to_string(),
            content: Some(outline.to_string()),
            parent_id: None,
        }
    }

    pub fn section(title: &str, course_id: &RecordId) -> Self {
        NewRecord {
            kind: RecordKind::Section,
            title: title.to_string(),
            content: None,
            parent_id: Some(course_id.clone()),
        }
    }

    pub fn lesson(title: &str, content: &str, section_id: &RecordId) -> Self {
        NewRecord {
            kind: RecordKind::Lesson,
            title: title.to_string(),
            content: Some(content.to_string()),
            parent_id: Some(section_id.clone()),
        }
    }
}

/// A record as the store keeps it.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StoredRecord {
    pub id: RecordId,
    pub kind: RecordKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<RecordId>,
    pub status: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl StoredRecord {
    pub fn from_new(record: NewRecord) -> Self {
        StoredRecord {
            id: RecordId::generate(),
            kind: record.kind,
            title: record.title,
            content: record.content,
            parent_id: record.parent_id,
            status: "publish".to_string(),
            metadata: HashMap::new(),
            created_at: Utc::now(),
        }
    }
}
