use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SectionRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(range(min = 1, max = 50, message = "lesson_count must be between 1 and 50"))]
    pub lesson_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateCourseRequest {
    #[validate(length(min = 1, max = 200))]
    pub course_title: String,

    #[serde(default)]
    #[validate(nested)]
    pub sections: Vec<SectionRequest>,
}

impl GenerateCourseRequest {
    pub fn new(course_title: &str, sections: Vec<SectionRequest>) -> Self {
        Self {
            course_title: course_title.to_string(),
            sections,
        }
    }

    /// Strips surrounding whitespace from every title, as the admin form did.
    pub fn normalized(mut self) -> Self {
        self.course_title = self.course_title.trim().to_string();
        for section in &mut self.sections {
            section.title = section.title.trim().to_string();
        }
        self
    }
}

impl SectionRequest {
    pub fn new(title: &str, lesson_count: u32) -> Self {
        Self {
            title: title.to_string(),
            lesson_count,
        }
    }
}
