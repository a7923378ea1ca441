//! In-memory [`CollectionHandle`] for tests and offline runs.
//!
//! Supports the subset of query behavior the checks use: equality filters on
//! top-level fields, inclusion projections, sorts on top-level fields, limits
//! and a seeded `$sample`.

use crate::collection::{CollectionHandle, DocumentStream, FindSpec};
use crate::error::Result;
use crate::value::{compare_bson, values_equal};
use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::stream::{self, StreamExt};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cmp::Ordering;

/// A collection held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryCollection {
    namespace: String,
    documents: Vec<Document>,
    indexes: Vec<Document>,
    sample_seed: u64,
}

impl MemoryCollection {
    /// An empty collection carrying the default `_id_` index.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            documents: Vec::new(),
            indexes: vec![doc! { "v": 2, "key": { "_id": 1 }, "name": "_id_" }],
            sample_seed: 0,
        }
    }

    pub fn with_documents(mut self, documents: impl IntoIterator<Item = Document>) -> Self {
        self.documents.extend(documents);
        self
    }

    /// Appends an index descriptor exactly as given.
    pub fn with_index(mut self, descriptor: Document) -> Self {
        self.indexes.push(descriptor);
        self
    }

    /// Replaces all index descriptors, including the default one.
    pub fn with_indexes(mut self, descriptors: impl IntoIterator<Item = Document>) -> Self {
        self.indexes = descriptors.into_iter().collect();
        self
    }

    pub fn with_sample_seed(mut self, seed: u64) -> Self {
        self.sample_seed = seed;
        self
    }

    fn matching<'a>(&'a self, filter: &'a Document) -> impl Iterator<Item = &'a Document> + 'a {
        self.documents
            .iter()
            .filter(move |document| matches_filter(document, filter))
    }
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(field, expected)| {
        document
            .get(field)
            .is_some_and(|actual| values_equal(actual, expected))
    })
}

fn compare_by_sort(a: &Document, b: &Document, sort: &Document) -> Ordering {
    for (field, direction) in sort {
        let missing = Bson::Null;
        let ordering = compare_bson(
            a.get(field).unwrap_or(&missing),
            b.get(field).unwrap_or(&missing),
        );
        let descending = matches!(direction, Bson::Int32(d) if *d < 0)
            || matches!(direction, Bson::Int64(d) if *d < 0)
            || matches!(direction, Bson::Double(d) if *d < 0.0);
        let ordering = if descending {
            ordering.reverse()
        } else {
            ordering
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn project(document: &Document, projection: &Document) -> Document {
    let exclude_id = projection
        .get("_id")
        .is_some_and(|include| {
            matches!(
                include,
                Bson::Int32(0) | Bson::Int64(0) | Bson::Boolean(false)
            )
        });
    let mut projected = Document::new();
    for (field, value) in document {
        let wanted = if field == "_id" {
            !exclude_id
        } else {
            projection.contains_key(field)
        };
        if wanted {
            projected.insert(field.clone(), value.clone());
        }
    }
    projected
}

#[async_trait]
impl CollectionHandle for MemoryCollection {
    fn namespace(&self) -> String {
        self.namespace.clone()
    }

    async fn count_documents(&self, filter: Document) -> Result<u64> {
        Ok(self.matching(&filter).count() as u64)
    }

    async fn list_indexes(&self) -> Result<Vec<Document>> {
        Ok(self.indexes.clone())
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Document>> {
        Ok(self.matching(&filter).next().cloned())
    }

    async fn find(&self, filter: Document, spec: FindSpec) -> Result<DocumentStream> {
        let mut found: Vec<Document> = self.matching(&filter).cloned().collect();
        if let Some(sort) = &spec.sort {
            found.sort_by(|a, b| compare_by_sort(a, b, sort));
        }
        if let Some(limit) = spec.limit.filter(|limit| *limit > 0) {
            found.truncate(limit as usize);
        }
        if let Some(projection) = &spec.projection {
            found = found.iter().map(|d| project(d, projection)).collect();
        }
        Ok(stream::iter(found.into_iter().map(Ok)).boxed())
    }

    async fn sample(&self, size: i64) -> Result<DocumentStream> {
        let mut rng = StdRng::seed_from_u64(self.sample_seed);
        let mut drawn = self.documents.clone();
        drawn.shuffle(&mut rng);
        drawn.truncate(size.max(0) as usize);
        Ok(stream::iter(drawn.into_iter().map(Ok)).boxed())
    }
}
