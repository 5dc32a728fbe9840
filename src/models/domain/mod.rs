pub mod course;
pub mod lesson;
pub mod record;
pub mod section;
pub use course::Course;
pub use lesson::{Lesson, LessonDraft};
pub use record::{NewRecord, RecordId, RecordKind, StoredRecord};
pub use section::Section;
