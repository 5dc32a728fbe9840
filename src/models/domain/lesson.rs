use serde::Serialize;

use crate::models::domain::RecordId;

/// A parsed lesson that has not been persisted yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonDraft {
    pub title: String,
    pub content: String,
    pub placeholder: bool,
}

impl LessonDraft {
    pub fn new(title: &str, content: &str) -> Self {
        LessonDraft {
            title: title.to_string(),
            content: content.to_string(),
            placeholder: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Lesson {
    pub id: RecordId,
    pub section_id: RecordId,
    pub title: String,
    pub content: String,
    pub order: u32, // 1-based, also written as record metadata
}
