//! MongoDB data store implementation

use crate::error::{DbError, DbResult};
use crate::traits::{DataStore, ENUMERATORS_COLLECTION, VERSION_COLLECTION};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use msm_core::{EnumeratorCatalog, IndexDefinition, LedgerEntry, INITIAL_VERSION};
use serde_json::Value;
use std::sync::Mutex;

struct Connection {
    client: Client,
    db: Database,
}

/// MongoDB data store
pub struct MongoBackend {
    uri: String,
    db_name: String,
    conn: Mutex<Option<Connection>>,
}

impl MongoBackend {
    /// Create a backend for `db_name` at `uri`. Nothing is opened until `connect`.
    pub fn new(uri: impl Into<String>, db_name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            db_name: db_name.into(),
            conn: Mutex::new(None),
        }
    }

    fn database(&self) -> DbResult<Database> {
        let guard = self
            .conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))?;
        guard
            .as_ref()
            .map(|c| c.db.clone())
            .ok_or(DbError::NotConnected)
    }

    /// Get a collection handle, creating the collection if it does not exist.
    async fn collection(&self, name: &str) -> DbResult<Collection<Document>> {
        let db = self.database()?;
        let existing = db
            .list_collection_names()
            .filter(doc! { "name": name })
            .await
            .map_err(|e| DbError::operation("listCollections", name, e))?;
        if existing.is_empty() {
            db.create_collection(name)
                .await
                .map_err(|e| DbError::operation("createCollection", name, e))?;
            log::info!("Collection {name} created");
        }
        Ok(db.collection::<Document>(name))
    }

    async fn coll_mod(&self, collection: &str, validator: Document) -> DbResult<Document> {
        // collMod requires the collection to exist
        self.collection(collection).await?;
        let db = self.database()?;
        db.run_command(doc! { "collMod": collection, "validator": validator })
            .await
            .map_err(|e| DbError::operation("collMod", collection, e))
    }
}

#[async_trait]
impl DataStore for MongoBackend {
    async fn connect(&self) -> DbResult<()> {
        let client = Client::with_uri_str(&self.uri)
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        let db = client.database(&self.db_name);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;

        let mut guard = self
            .conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))?;
        *guard = Some(Connection { client, db });
        log::info!("Database {} connected", self.db_name);
        Ok(())
    }

    async fn disconnect(&self) -> DbResult<()> {
        let connection = self
            .conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))?
            .take();
        if let Some(connection) = connection {
            connection.client.shutdown().await;
            log::info!("Database {} disconnected", self.db_name);
        }
        Ok(())
    }

    async fn get_version(&self, collection: &str) -> DbResult<String> {
        let ledger = self.collection(VERSION_COLLECTION).await?;
        let entry = ledger
            .find_one(doc! { "collectionName": collection })
            .await
            .map_err(|e| DbError::operation("findOne", VERSION_COLLECTION, e))?;
        Ok(entry
            .as_ref()
            .and_then(|d| d.get_str("currentVersion").ok())
            .unwrap_or(INITIAL_VERSION)
            .to_string())
    }

    async fn set_version(&self, collection: &str, version: &str) -> DbResult<()> {
        let ledger = self.collection(VERSION_COLLECTION).await?;
        ledger
            .update_one(
                doc! { "collectionName": collection },
                doc! { "$set": { "currentVersion": version } },
            )
            .upsert(true)
            .await
            .map_err(|e| DbError::operation("setVersion", collection, e))?;
        log::info!("Version of {collection} set to {version}");
        Ok(())
    }

    async fn get_version_data(&self) -> DbResult<Vec<LedgerEntry>> {
        let ledger = self.collection(VERSION_COLLECTION).await?;
        let documents: Vec<Document> = ledger
            .find(doc! {})
            .await
            .map_err(|e| DbError::operation("find", VERSION_COLLECTION, e))?
            .try_collect()
            .await
            .map_err(|e| DbError::operation("find", VERSION_COLLECTION, e))?;

        documents
            .into_iter()
            .map(|d| {
                bson::from_document::<LedgerEntry>(d)
                    .map_err(|e| DbError::InvalidDocument(e.to_string()))
            })
            .collect()
    }

    async fn clear_schema_validation(&self, collection: &str) -> DbResult<()> {
        self.coll_mod(collection, doc! {}).await?;
        log::info!("Schema validation cleared on {collection}");
        Ok(())
    }

    async fn apply_schema_validation(&self, collection: &str, validator: &Value) -> DbResult<()> {
        let schema = json_to_document(validator)?;
        self.coll_mod(collection, doc! { "$jsonSchema": schema })
            .await?;
        log::info!("Schema validation applied on {collection}");
        Ok(())
    }

    async fn drop_indexes(&self, collection: &str, names: &[String]) -> DbResult<()> {
        if names.is_empty() {
            return Ok(());
        }
        let coll = self.collection(collection).await?;
        for name in names {
            coll.drop_index(name.as_str())
                .await
                .map_err(|e| DbError::operation("dropIndex", collection, e))?;
            log::info!("Index {name} dropped from {collection}");
        }
        Ok(())
    }

    async fn add_indexes(&self, collection: &str, indexes: &[IndexDefinition]) -> DbResult<()> {
        if indexes.is_empty() {
            return Ok(());
        }
        let models = indexes
            .iter()
            .map(index_model)
            .collect::<DbResult<Vec<_>>>()?;
        let coll = self.collection(collection).await?;
        let result = coll
            .create_indexes(models)
            .await
            .map_err(|e| DbError::operation("createIndexes", collection, e))?;
        log::info!(
            "Indexes added to {collection}: {}",
            result.index_names.join(", ")
        );
        Ok(())
    }

    async fn execute_aggregations(
        &self,
        collection: &str,
        pipelines: &[Vec<Value>],
    ) -> DbResult<()> {
        let coll = self.collection(collection).await?;
        for pipeline in pipelines {
            let stages = pipeline
                .iter()
                .map(json_to_document)
                .collect::<DbResult<Vec<_>>>()?;
            let output: Vec<Document> = coll
                .aggregate(stages)
                .await
                .map_err(|e| DbError::operation("aggregate", collection, e))?
                .try_collect()
                .await
                .map_err(|e| DbError::operation("aggregate", collection, e))?;
            log::info!(
                "Aggregation on {collection} executed, {} documents returned",
                output.len()
            );
        }
        Ok(())
    }

    async fn bulk_load(&self, collection: &str, documents: &[Value]) -> DbResult<()> {
        if documents.is_empty() {
            log::info!("No documents to load into {collection}");
            return Ok(());
        }
        let docs = documents
            .iter()
            .map(json_to_document)
            .collect::<DbResult<Vec<_>>>()?;
        let coll = self.collection(collection).await?;
        let result = coll
            .insert_many(docs)
            .await
            .map_err(|e| DbError::operation("insertMany", collection, e))?;
        log::info!(
            "Bulk load inserted {} documents into {collection}",
            result.inserted_ids.len()
        );
        Ok(())
    }

    async fn upsert_enumerators(&self, catalog: &EnumeratorCatalog) -> DbResult<()> {
        let coll = self.collection(ENUMERATORS_COLLECTION).await?;
        for revision in catalog.revisions() {
            let value = serde_json::to_value(revision)
                .map_err(|e| DbError::InvalidDocument(e.to_string()))?;
            let document = json_to_document(&value)?;
            coll.replace_one(
                doc! { "version": i64::from(revision.revision_index) },
                document,
            )
            .upsert(true)
            .await
            .map_err(|e| DbError::operation("replaceOne", ENUMERATORS_COLLECTION, e))?;
        }
        log::info!("Enumerators upserted: {} revisions", catalog.len());
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "mongodb"
    }
}

/// Convert a JSON object, read as extended JSON, into a BSON document.
pub(crate) fn json_to_document(value: &Value) -> DbResult<Document> {
    match Bson::try_from(value.clone()).map_err(|e| DbError::InvalidDocument(e.to_string()))? {
        Bson::Document(document) => Ok(document),
        other => Err(DbError::InvalidDocument(format!(
            "expected an object, got {other}"
        ))),
    }
}

fn index_model(index: &IndexDefinition) -> DbResult<IndexModel> {
    let keys = json_to_document(&Value::Object(index.keys.clone()))?;
    let options = match &index.options {
        Some(options) => {
            let document = json_to_document(&Value::Object(options.clone()))?;
            Some(
                bson::from_document::<IndexOptions>(document)
                    .map_err(|e| DbError::InvalidDocument(e.to_string()))?,
            )
        }
        None => None,
    };
    let mut model = IndexModel::builder().keys(keys).build();
    model.options = options;
    Ok(model)
}

#[cfg(test)]
#[path = "mongo_test.rs"]
mod tests;
