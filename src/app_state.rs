use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::MongoRecordStore,
    services::{completion_client::OpenAiCompletionClient, course_generator::CourseGenerator},
};

#[derive(Clone)]
pub struct AppState {
    pub course_generator: Arc<CourseGenerator>,
    pub database: Database,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let database = Database::connect(&config).await?;

        let record_store = Arc::new(MongoRecordStore::new(&database, &config.records_collection));
        record_store.ensure_indexes().await?;

        let completion_client = Arc::new(OpenAiCompletionClient::from_config(&config));
        let course_generator = CourseGenerator::new(completion_client, record_store)
            .with_section_concurrency(config.section_concurrency);

        Ok(Self::from_parts(database, course_generator))
    }

    pub fn from_parts(database: Database, course_generator: CourseGenerator) -> Self {
        Self {
            course_generator: Arc::new(course_generator),
            database,
        }
    }
}
