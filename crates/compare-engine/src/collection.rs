//! The read-only collection capability the checks run against.

use crate::error::{CompareError, Result};
use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use mongodb::error::ErrorKind;
use mongodb::{Collection, Database};
use tracing::debug;

/// Server error code for `NamespaceNotFound`.
const NAMESPACE_NOT_FOUND: i32 = 26;

/// A lazily fetched, forward-only sequence of documents. Dropping the stream
/// releases the server-side cursor.
pub type DocumentStream = BoxStream<'static, Result<Document>>;

/// Sort direction for ordered scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// The value used in a sort specification (`1` or `-1`).
    pub fn as_i32(self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

/// Options for [`CollectionHandle::find`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindSpec {
    pub projection: Option<Document>,
    pub sort: Option<Document>,
    pub limit: Option<i64>,
}

impl FindSpec {
    /// `_id`-only scan in the given direction, capped at `limit` documents.
    pub fn ids(direction: SortDirection, limit: i64) -> Self {
        Self {
            projection: Some(doc! { "_id": 1 }),
            sort: Some(doc! { "_id": direction.as_i32() }),
            limit: Some(limit),
        }
    }
}

/// Read-only operations on one physical collection.
///
/// Connection lifecycle belongs to the caller; checks only borrow a handle.
#[async_trait]
pub trait CollectionHandle: Send + Sync {
    /// `database.collection`, used in diagnostics.
    fn namespace(&self) -> String;

    /// Exact number of documents matching `filter`.
    async fn count_documents(&self, filter: Document) -> Result<u64>;

    /// Raw index descriptors, in whatever order the server returns them.
    async fn list_indexes(&self) -> Result<Vec<Document>>;

    /// First document matching `filter`, if any.
    async fn find_one(&self, filter: Document) -> Result<Option<Document>>;

    async fn find(&self, filter: Document, spec: FindSpec) -> Result<DocumentStream>;

    /// Uniform random sample of at most `size` documents.
    async fn sample(&self, size: i64) -> Result<DocumentStream>;
}

/// A [`CollectionHandle`] backed by a live MongoDB collection.
#[derive(Clone, Debug)]
pub struct MongoCollection {
    database: Database,
    collection: Collection<Document>,
}

impl MongoCollection {
    pub fn new(database: Database, collection_name: &str) -> Self {
        let collection = database.collection::<Document>(collection_name);
        Self {
            database,
            collection,
        }
    }

    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }
}

#[async_trait]
impl CollectionHandle for MongoCollection {
    fn namespace(&self) -> String {
        self.collection.namespace().to_string()
    }

    async fn count_documents(&self, filter: Document) -> Result<u64> {
        debug!("Counting documents in {}", self.namespace());
        Ok(self.collection.count_documents(filter).await?)
    }

    async fn list_indexes(&self) -> Result<Vec<Document>> {
        debug!("Listing indexes of {}", self.namespace());
        // Issued as a raw command so descriptors keep every field and the
        // key document keeps its field order.
        let command = doc! { "listIndexes": self.collection.name() };
        let cursor = match self.database.run_cursor_command(command).await {
            Ok(cursor) => cursor,
            Err(err) => {
                if let ErrorKind::Command(command_error) = err.kind.as_ref() {
                    if command_error.code == NAMESPACE_NOT_FOUND {
                        return Ok(Vec::new());
                    }
                }
                return Err(err.into());
            }
        };
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Document>> {
        Ok(self.collection.find_one(filter).await?)
    }

    async fn find(&self, filter: Document, spec: FindSpec) -> Result<DocumentStream> {
        let mut action = self.collection.find(filter);
        if let Some(projection) = spec.projection {
            action = action.projection(projection);
        }
        if let Some(sort) = spec.sort {
            action = action.sort(sort);
        }
        if let Some(limit) = spec.limit {
            action = action.limit(limit);
        }
        let cursor = action.await?;
        Ok(cursor.map_err(CompareError::from).boxed())
    }

    async fn sample(&self, size: i64) -> Result<DocumentStream> {
        debug!("Sampling {} documents from {}", size, self.namespace());
        let pipeline = vec![doc! { "$sample": { "size": size } }];
        let cursor = self.collection.aggregate(pipeline).await?;
        Ok(cursor.map_err(CompareError::from).boxed())
    }
}

/// The `_id` of a document returned from `namespace`.
pub fn document_id<'a>(document: &'a Document, namespace: &str) -> Result<&'a Bson> {
    document
        .get("_id")
        .ok_or_else(|| CompareError::MissingId(namespace.to_string()))
}
