pub const COMPLETION_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const COMPLETION_MODEL: &str = "gpt-4o-mini";

pub const OUTLINE_MAX_TOKENS: u32 = 1000;
pub const LESSON_BATCH_MAX_TOKENS: u32 = 2000;

pub const COURSE_CREATOR_PERSONA: &str = "You are a knowledgeable course creator.";
pub const LESSON_PLANNER_PERSONA: &str = "You are a helpful lesson planner.";

pub const COURSE_OUTLINE_INSTRUCTION: &str = "Create a detailed outline for a course titled: ";
pub const LESSON_BATCH_INSTRUCTION: &str = "Generate {count} lesson titles and content for the section: {section}";

pub const PLACEHOLDER_LESSON_TITLE: &str = "Untitled Lesson";
pub const PLACEHOLDER_LESSON_CONTENT: &str = "Content is missing for this lesson.";

pub const LESSON_ORDER_META_KEY: &str = "_lesson_order";
