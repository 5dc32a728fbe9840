use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{NewRecord, RecordId, StoredRecord},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_record(&self, record: NewRecord) -> AppResult<RecordId>;
    async fn set_metadata(&self, id: &RecordId, key: &str, value: serde_json::Value) -> AppResult<()>;
}

pub struct MongoRecordStore {
    collection: Collection<StoredRecord>,
}

impl MongoRecordStore {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for records collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let parent_index = IndexModel::builder()
            .keys(doc! { "parent_id": 1, "kind": 1 })
            .options(
                IndexOptions::builder()
                    .name("parent_kind".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(parent_index).await?;

        log::info!("Successfully created indexes for records collection");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MongoRecordStore {
    async fn create_record(&self, record: NewRecord) -> AppResult<RecordId> {
        let stored = StoredRecord::from_new(record);
        self.collection.insert_one(&stored).await?;
        Ok(stored.id)
    }

    async fn set_metadata(&self, id: &RecordId, key: &str, value: serde_json::Value) -> AppResult<()> {
        let mut fields = Document::new();
        fields.insert(format!("metadata.{}", key), to_bson(&value)?);

        let result = self
            .collection
            .update_one(doc! { "id": id.as_str() }, doc! { "$set": fields })
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::Persistence(format!(
                "Record with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
