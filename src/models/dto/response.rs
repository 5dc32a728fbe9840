use serde::Serialize;

use crate::models::domain::{Course, Lesson, Section};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    Success,
    Failure,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionReport {
    pub title: String,
    pub status: SectionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
    pub lessons: Vec<Lesson>,
    pub placeholder_lessons: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
}

impl SectionReport {
    pub fn succeeded(section: Section, lessons: Vec<Lesson>, placeholder_lessons: usize) -> Self {
        Self {
            title: section.title.clone(),
            status: SectionStatus::Success,
            section: Some(section),
            lessons,
            placeholder_lessons,
            failure_message: None,
        }
    }

    pub fn failed(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            status: SectionStatus::Failure,
            section: None,
            lessons: Vec::new(),
            placeholder_lessons: 0,
            failure_message: Some(message.into()),
        }
    }

    /// A section whose record exists but whose lessons did not all persist.
    pub fn interrupted(
        section: Section,
        lessons: Vec<Lesson>,
        placeholder_lessons: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            title: section.title.clone(),
            status: SectionStatus::Failure,
            section: Some(section),
            lessons,
            placeholder_lessons,
            failure_message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SectionStatus::Success
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CourseReport {
    pub course: Course,
    pub sections: Vec<SectionReport>,
}

impl CourseReport {
    pub fn failed_sections(&self) -> usize {
        self.sections.iter().filter(|s| !s.is_success()).count()
    }
}
