use crate::{
    constants::prompts::{PLACEHOLDER_LESSON_CONTENT, PLACEHOLDER_LESSON_TITLE},
    models::domain::LessonDraft,
};

/// Splits a lesson batch into exactly `lesson_count` drafts.
///
/// Lines pair up as title, content, title, content... Any index without a
/// full pair becomes a placeholder lesson instead of failing the batch.
pub fn parse_lessons(raw: &str, lesson_count: usize, section_title: &str) -> Vec<LessonDraft> {
    let lines: Vec<&str> = raw.split('\n').collect();

    (0..lesson_count)
        .map(|i| match (lines.get(i * 2), lines.get(i * 2 + 1)) {
            (Some(title), Some(content)) => LessonDraft::new(title.trim(), content.trim()),
            _ => {
                log::warn!(
                    "Incomplete lesson data at index {} for section: {}",
                    i,
                    section_title
                );
                placeholder_lesson(i + 1)
            }
        })
        .collect()
}

fn placeholder_lesson(position: usize) -> LessonDraft {
    LessonDraft {
        title: format!("{} {}", PLACEHOLDER_LESSON_TITLE, position),
        content: PLACEHOLDER_LESSON_CONTENT.to_string(),
        placeholder: true,
    }
}
