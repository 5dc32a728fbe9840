use crate::{
    constants::prompts::{
        COMPLETION_MODEL, COURSE_CREATOR_PERSONA, COURSE_OUTLINE_INSTRUCTION,
        LESSON_BATCH_INSTRUCTION, LESSON_BATCH_MAX_TOKENS, LESSON_PLANNER_PERSONA,
        OUTLINE_MAX_TOKENS,
    },
    models::dto::completion::{ChatMessage, CompletionRequest, PromptPurpose},
};

pub fn build_course_outline_prompt(course_title: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(COURSE_CREATOR_PERSONA),
        ChatMessage::user(format!("{}{}", COURSE_OUTLINE_INSTRUCTION, course_title)),
    ]
}

pub fn build_lesson_batch_prompt(section_title: &str, lesson_count: u32) -> Vec<ChatMessage> {
    let instruction = LESSON_BATCH_INSTRUCTION
        .replace("{count}", &lesson_count.to_string())
        .replace("{section}", section_title);

    vec![
        ChatMessage::system(LESSON_PLANNER_PERSONA),
        ChatMessage::user(instruction),
    ]
}

pub fn course_outline_request(course_title: &str) -> CompletionRequest {
    CompletionRequest {
        purpose: PromptPurpose::CourseOutline,
        model: COMPLETION_MODEL.to_string(),
        messages: build_course_outline_prompt(course_title),
        max_tokens: OUTLINE_MAX_TOKENS,
    }
}

pub fn lesson_batch_request(section_title: &str, lesson_count: u32) -> CompletionRequest {
    CompletionRequest {
        purpose: PromptPurpose::LessonBatch,
        model: COMPLETION_MODEL.to_string(),
        messages: build_lesson_batch_prompt(section_title, lesson_count),
        max_tokens: LESSON_BATCH_MAX_TOKENS,
    }
}
