//! MongoDB-backed document store.

use async_trait::async_trait;
use mongodb::{
    bson::{self, doc, Bson, Document as BsonDocument},
    Client, Database,
};

use crate::store::{Document, DocumentId, DocumentStore, StoreError};

/// A connected MongoDB database handle.
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Connect to `uri` and health-check the connection against `database`.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StoreError::Connect {
                target: redact(uri),
                reason: e.to_string(),
            })?;

        let store = Self {
            database: client.database(database),
            client,
        };
        store.ping().await?;
        Ok(store)
    }

    fn collection(&self, name: &str) -> mongodb::Collection<BsonDocument> {
        self.database.collection::<BsonDocument>(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Ping(e.to_string()))
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<DocumentId, StoreError> {
        let document = bson::to_document(&document).map_err(|e| StoreError::Encode {
            collection: collection.to_string(),
            reason: e.to_string(),
        })?;

        let result = self
            .collection(collection)
            .insert_one(document)
            .await
            .map_err(|e| StoreError::Write {
                collection: collection.to_string(),
                reason: e.to_string(),
            })?;

        Ok(DocumentId(render_id(&result.inserted_id)))
    }

    async fn drop_collection(&self, collection: &str) -> Result<(), StoreError> {
        self.collection(collection)
            .drop()
            .await
            .map_err(|e| StoreError::Drop {
                collection: collection.to_string(),
                reason: e.to_string(),
            })
    }

    async fn disconnect(&self) -> Result<(), StoreError> {
        self.client.clone().shutdown().await;
        tracing::info!("Connection to MongoDB closed");
        Ok(())
    }
}

fn render_id(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Strip credentials from a connection string before it reaches a log line.
fn redact(uri: &str) -> String {
    match (uri.split_once("://"), uri.rfind('@')) {
        (Some((scheme, _)), Some(at)) => format!("{}://***{}", scheme, &uri[at..]),
        _ => uri.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_redact_hides_credentials() {
        assert_eq!(
            redact("mongodb://user:secret@db:27017/?authSource=admin"),
            "mongodb://***@db:27017/?authSource=admin"
        );
        assert_eq!(redact("mongodb://mongodb:27017"), "mongodb://mongodb:27017");
    }

    #[test]
    fn test_render_object_id_as_hex() {
        let oid = ObjectId::new();
        assert_eq!(render_id(&Bson::ObjectId(oid)), oid.to_hex());
        assert_eq!(render_id(&Bson::String("abc".into())), "abc");
    }
}
