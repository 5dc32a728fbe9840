use serde::Serialize;

use crate::models::domain::RecordId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: RecordId,
    pub course_id: RecordId,
    pub title: String,
    pub position: usize, // Insertion order within the course, 1-based
}
