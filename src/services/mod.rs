pub mod completion_client;
pub mod course_generator;
pub mod lesson_parser;
pub mod prompt_builder;
