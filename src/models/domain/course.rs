use serde::Serialize;

use crate::models::domain::RecordId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Course {
    pub id: RecordId,      // Assigned by the record store
    pub title: String,
    pub outline: String,   // Generated body, never changed after creation
}
