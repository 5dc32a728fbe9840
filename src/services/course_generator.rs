use std::fmt;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde_json::json;
use validator::Validate;

use crate::{
    constants::prompts::LESSON_ORDER_META_KEY,
    errors::{AppError, AppResult},
    models::{
        domain::{Course, Lesson, LessonDraft, NewRecord, RecordId, Section},
        dto::{
            request::{GenerateCourseRequest, SectionRequest},
            response::{CourseReport, SectionReport},
        },
    },
    repositories::RecordStore,
    services::{
        completion_client::CompletionClient,
        lesson_parser::parse_lessons,
        prompt_builder::{course_outline_request, lesson_batch_request},
    },
};

/// Where a generation run currently is. Sections repeat the
/// `LessonsRequested -> SectionPersisted -> LessonsPersisted` cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Idle,
    OutlineRequested,
    CoursePersisted,
    LessonsRequested,
    SectionPersisted,
    LessonsPersisted,
    Done,
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationStage::Idle => write!(f, "idle"),
            GenerationStage::OutlineRequested => write!(f, "outline_requested"),
            GenerationStage::CoursePersisted => write!(f, "course_persisted"),
            GenerationStage::LessonsRequested => write!(f, "lessons_requested"),
            GenerationStage::SectionPersisted => write!(f, "section_persisted"),
            GenerationStage::LessonsPersisted => write!(f, "lessons_persisted"),
            GenerationStage::Done => write!(f, "done"),
        }
    }
}

fn enter_stage(course_title: &str, section_title: Option<&str>, stage: GenerationStage) {
    match section_title {
        Some(section) => log::debug!("course '{}' section '{}': {}", course_title, section, stage),
        None => log::debug!("course '{}': {}", course_title, stage),
    }
}

/// Store failures surface as persistence errors whatever the store reported.
fn as_persistence(err: AppError) -> AppError {
    match err {
        AppError::Persistence(_) => err,
        other => AppError::Persistence(other.to_string()),
    }
}

pub struct CourseGenerator {
    completions: Arc<dyn CompletionClient>,
    records: Arc<dyn RecordStore>,
    section_concurrency: usize,
}

impl CourseGenerator {
    pub fn new(completions: Arc<dyn CompletionClient>, records: Arc<dyn RecordStore>) -> Self {
        Self {
            completions,
            records,
            section_concurrency: 1,
        }
    }

    pub fn with_section_concurrency(mut self, section_concurrency: usize) -> Self {
        self.section_concurrency = section_concurrency.max(1);
        self
    }

    /// Runs the whole workflow. Only the outline and the course record are
    /// fatal; every section succeeds or fails on its own.
    pub async fn generate(&self, request: GenerateCourseRequest) -> AppResult<CourseReport> {
        let request = request.normalized();
        request.validate()?;

        enter_stage(&request.course_title, None, GenerationStage::Idle);
        let course = self.create_course(&request.course_title).await?;

        let course_ref = &course;
        let sections: Vec<SectionReport> = stream::iter(request.sections.iter().enumerate())
            .map(move |(index, section)| self.generate_section(course_ref, index + 1, section))
            .buffered(self.section_concurrency)
            .collect()
            .await;

        enter_stage(&course.title, None, GenerationStage::Done);
        let report = CourseReport { course, sections };
        log::info!(
            "Generated course '{}' ({}) with {} section(s), {} failed",
            report.course.title,
            report.course.id,
            report.sections.len(),
            report.failed_sections()
        );

        Ok(report)
    }

    async fn create_course(&self, title: &str) -> AppResult<Course> {
        enter_stage(title, None, GenerationStage::OutlineRequested);
        let outline = self
            .completions
            .complete(&course_outline_request(title))
            .await
            .map_err(|err| {
                log::error!("Outline generation failed for course '{}': {}", title, err);
                err
            })?;

        let id = self
            .records
            .create_record(NewRecord::course(title, &outline))
            .await
            .map_err(|err| {
                log::error!("Failed to save course '{}': {}", title, err);
                as_persistence(err)
            })?;

        enter_stage(title, None, GenerationStage::CoursePersisted);
        Ok(Course {
            id,
            title: title.to_string(),
            outline,
        })
    }

    async fn generate_section(
        &self,
        course: &Course,
        position: usize,
        request: &SectionRequest,
    ) -> SectionReport {
        let title = request.title.as_str();

        enter_stage(&course.title, Some(title), GenerationStage::LessonsRequested);
        let raw = match self
            .completions
            .complete(&lesson_batch_request(title, request.lesson_count))
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                log::error!("Lesson generation failed for section '{}': {}", title, err);
                return SectionReport::failed(title, err.to_string());
            }
        };

        let drafts = parse_lessons(&raw, request.lesson_count as usize, title);
        let placeholders = drafts.iter().filter(|d| d.placeholder).count();

        let section_id = match self
            .records
            .create_record(NewRecord::section(title, &course.id))
            .await
        {
            Ok(id) => id,
            Err(err) => {
                let err = as_persistence(err);
                log::error!("Failed to save section '{}': {}", title, err);
                return SectionReport::failed(title, err.to_string());
            }
        };
        enter_stage(&course.title, Some(title), GenerationStage::SectionPersisted);

        let section = Section {
            id: section_id,
            course_id: course.id.clone(),
            title: title.to_string(),
            position,
        };

        let mut lessons = Vec::with_capacity(drafts.len());
        for (index, draft) in drafts.iter().enumerate() {
            let order = index as u32 + 1;
            match self.persist_lesson(&section.id, draft, order).await {
                Ok(lesson) => lessons.push(lesson),
                Err(err) => {
                    log::error!(
                        "Failed to save lesson {} of section '{}': {}",
                        order,
                        title,
                        err
                    );
                    let message = format!("Lesson {} was not saved: {}", order, err);
                    return SectionReport::interrupted(section, lessons, placeholders, message);
                }
            }
        }

        enter_stage(&course.title, Some(title), GenerationStage::LessonsPersisted);
        log::info!(
            "Section \"{}\" and {} lesson(s) generated successfully",
            title,
            lessons.len()
        );
        SectionReport::succeeded(section, lessons, placeholders)
    }

    async fn persist_lesson(
        &self,
        section_id: &RecordId,
        draft: &LessonDraft,
        order: u32,
    ) -> AppResult<Lesson> {
        let id = self
            .records
            .create_record(NewRecord::lesson(&draft.title, &draft.content, section_id))
            .await
            .map_err(as_persistence)?;

        self.records
            .set_metadata(&id, LESSON_ORDER_META_KEY, json!(order))
            .await
            .map_err(as_persistence)?;

        Ok(Lesson {
            id,
            section_id: section_id.clone(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{
            domain::RecordKind,
            dto::{completion::PromptPurpose, response::SectionStatus},
        },
        repositories::record_store::MockRecordStore,
        services::completion_client::MockCompletionClient,
    };

    fn id_for(record: &NewRecord) -> RecordId {
        RecordId::from(format!("{}:{}", record.kind, record.title).as_str())
    }

    fn accepting_store() -> MockRecordStore {
        let mut store = MockRecordStore::new();
        store
            .expect_create_record()
            .returning(|record| Ok(id_for(&record)));
        store.expect_set_metadata().returning(|_, _, _| Ok(()));
        store
    }

    /// Outline succeeds; lesson batches answer with two lessons unless the
    /// prompt mentions "Broken".
    fn scripted_client() -> MockCompletionClient {
        let mut client = MockCompletionClient::new();
        client.expect_complete().returning(|request| match request.purpose {
            PromptPurpose::CourseOutline => Ok("1. Intro\n2. Depth".to_string()),
            PromptPurpose::LessonBatch => {
                let prompt = &request.messages[1].content;
                if prompt.contains("Broken") {
                    Err(AppError::Transport("connection reset".to_string()))
                } else {
                    Ok("L1\nC1\nL2\nC2".to_string())
                }
            }
        });
        client
    }

    fn generator(client: MockCompletionClient, store: MockRecordStore) -> CourseGenerator {
        CourseGenerator::new(Arc::new(client), Arc::new(store))
    }

    #[tokio::test]
    async fn outline_failure_is_fatal_and_creates_nothing() {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .times(1)
            .returning(|_| Err(AppError::Transport("connection refused".to_string())));
        let mut store = MockRecordStore::new();
        store.expect_create_record().never();

        let request = GenerateCourseRequest::new("Intro to Go", vec![SectionRequest::new("Basics", 3)]);
        let result = generator(client, store).generate(request).await;

        assert_eq!(
            result.map(|r| r.course.id),
            Err(AppError::Transport("connection refused".to_string()))
        );
    }

    #[tokio::test]
    async fn course_persistence_failure_is_fatal_and_skips_sections() {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .times(1)
            .returning(|_| Ok("outline".to_string()));
        let mut store = MockRecordStore::new();
        store
            .expect_create_record()
            .times(1)
            .returning(|_| Err(AppError::Persistence("insert rejected".to_string())));

        let request = GenerateCourseRequest::new("Intro to Go", vec![SectionRequest::new("Basics", 3)]);
        let result = generator(client, store).generate(request).await;

        assert!(matches!(result, Err(AppError::Persistence(_))));
    }

    #[tokio::test]
    async fn non_persistence_store_errors_are_reported_as_persistence() {
        let mut client = MockCompletionClient::new();
        client.expect_complete().returning(|_| Ok("outline".to_string()));
        let mut store = MockRecordStore::new();
        store
            .expect_create_record()
            .returning(|_| Err(AppError::InternalError("bson".to_string())));

        let result = generator(client, store)
            .generate(GenerateCourseRequest::new("Intro", vec![]))
            .await;

        assert!(matches!(result, Err(AppError::Persistence(_))));
    }

    #[tokio::test]
    async fn failing_section_does_not_block_siblings() {
        let request = GenerateCourseRequest::new(
            "Intro to Go",
            vec![
                SectionRequest::new("Basics", 2),
                SectionRequest::new("Broken", 2),
                SectionRequest::new("Advanced", 2),
            ],
        );

        let report = generator(scripted_client(), accepting_store())
            .generate(request)
            .await
            .expect("run should complete");

        let statuses: Vec<SectionStatus> = report.sections.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![SectionStatus::Success, SectionStatus::Failure, SectionStatus::Success]
        );
        assert_eq!(
            report.sections[1].failure_message.as_deref(),
            Some("Failed to reach the completion API: connection reset")
        );
        assert_eq!(report.sections[2].section.as_ref().map(|s| s.position), Some(3));
    }

    #[tokio::test]
    async fn section_persistence_failure_continues_with_next_section() {
        let mut store = MockRecordStore::new();
        store.expect_create_record().returning(|record| {
            if record.kind == RecordKind::Section && record.title == "Basics" {
                Err(AppError::Persistence("duplicate key".to_string()))
            } else {
                Ok(id_for(&record))
            }
        });
        store.expect_set_metadata().returning(|_, _, _| Ok(()));

        let request = GenerateCourseRequest::new(
            "Intro",
            vec![SectionRequest::new("Basics", 2), SectionRequest::new("Advanced", 2)],
        );
        let report = generator(scripted_client(), store)
            .generate(request)
            .await
            .expect("run should complete");

        assert_eq!(report.sections[0].status, SectionStatus::Failure);
        assert!(report.sections[0].lessons.is_empty());
        assert_eq!(report.sections[1].status, SectionStatus::Success);
        assert_eq!(report.sections[1].lessons.len(), 2);
    }

    #[tokio::test]
    async fn lesson_order_metadata_failure_interrupts_section() {
        let mut store = MockRecordStore::new();
        store
            .expect_create_record()
            .returning(|record| Ok(id_for(&record)));
        store
            .expect_set_metadata()
            .withf(|_, key, _| key == LESSON_ORDER_META_KEY)
            .returning(|_, _, value| {
                if value == json!(2) {
                    Err(AppError::Persistence("write conflict".to_string()))
                } else {
                    Ok(())
                }
            });

        let report = generator(scripted_client(), store)
            .generate(GenerateCourseRequest::new("Intro", vec![SectionRequest::new("Basics", 2)]))
            .await
            .expect("run should complete");

        let section = &report.sections[0];
        assert_eq!(section.status, SectionStatus::Failure);
        assert!(section.section.is_some());
        assert_eq!(section.lessons.len(), 1);
        assert!(section
            .failure_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Lesson 2 was not saved")));
    }

    #[tokio::test]
    async fn lessons_are_linked_to_their_section_in_order() {
        let report = generator(scripted_client(), accepting_store())
            .generate(GenerateCourseRequest::new("Intro", vec![SectionRequest::new("Basics", 3)]))
            .await
            .expect("run should complete");

        let section = &report.sections[0];
        let section_id = section.section.as_ref().map(|s| s.id.clone());
        assert_eq!(section.status, SectionStatus::Success);
        assert_eq!(section.placeholder_lessons, 1);
        assert!(section.lessons.iter().all(|l| Some(l.section_id.clone()) == section_id));
        let orders: Vec<u32> = section.lessons.iter().map(|l| l.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(section.lessons[2].title, "Untitled Lesson 3");
    }

    #[tokio::test]
    async fn invalid_request_is_rejected_before_any_call() {
        let mut client = MockCompletionClient::new();
        client.expect_complete().never();
        let mut store = MockRecordStore::new();
        store.expect_create_record().never();

        let result = generator(client, store)
            .generate(GenerateCourseRequest::new("Intro", vec![SectionRequest::new("Basics", 0)]))
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn concurrent_sections_keep_request_order() {
        let sections = (1..=6)
            .map(|i| SectionRequest::new(&format!("Section {}", i), 1))
            .collect();

        let report = generator(scripted_client(), accepting_store())
            .with_section_concurrency(4)
            .generate(GenerateCourseRequest::new("Intro", sections))
            .await
            .expect("run should complete");

        let titles: Vec<&str> = report.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Section 1", "Section 2", "Section 3", "Section 4", "Section 5", "Section 6"]
        );
    }

    #[test]
    fn stage_names_are_snake_case() {
        assert_eq!(GenerationStage::OutlineRequested.to_string(), "outline_requested");
        assert_eq!(GenerationStage::Done.to_string(), "done");
    }
}
