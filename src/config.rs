use std::env;
use secrecy::SecretString;

use crate::constants::prompts::COMPLETION_ENDPOINT;

/// Process-wide settings, loaded once at startup. The API key is read here
/// rather than per call; restart the service to pick up a new key.
#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: SecretString,
    pub completion_endpoint: String,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub records_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub section_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            // A missing key is not an error here; the API rejects the call instead.
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY").unwrap_or_default()),
            completion_endpoint: env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| COMPLETION_ENDPOINT.to_string()),
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "course-forge-local".to_string()),
            records_collection: env::var("RECORDS_COLLECTION")
                .unwrap_or_else(|_| "records".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            section_concurrency: env::var("SECTION_CONCURRENCY")
                .ok()
                .and_then(|c| c.parse().ok())
                .filter(|c| *c > 0)
                .unwrap_or(1),
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            openai_api_key: SecretString::from("test-api-key".to_string()),
            completion_endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "course-forge-test".to_string(),
            records_collection: "records".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            section_concurrency: 1,
        }
    }
}
