//! Index definition comparison.
//!
//! Descriptors are first compared as unordered mappings (minus ignored build
//! options) after sorting both listings by name, since the server returns
//! them in no particular order. When that passes, every key document is
//! compared again with field order preserved: `{a: 1, b: 1}` and
//! `{b: 1, a: 1}` are the same set of fields but different indexes.
//!
//! Key documents are matched up by index name. An index whose name does not
//! follow its key order defeats that matching; this is a known limitation.

use crate::collection::CollectionHandle;
use crate::error::{CompareError, Result};
use crate::report::{CheckKind, CheckResult};
use crate::value::{documents_equal, DocumentComparator, FieldOrder};
use bson::{Bson, Document};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

/// A raw index descriptor viewed through the fields the check keys on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexDescriptor<'a> {
    pub name: &'a str,
    /// Ordered key document, e.g. `{ "a": 1, "b": -1 }`.
    pub key: &'a Document,
    pub raw: &'a Document,
}

impl<'a> IndexDescriptor<'a> {
    pub fn parse(raw: &'a Document, namespace: &str) -> Result<Self> {
        let malformed = |reason: String| CompareError::MalformedIndex {
            namespace: namespace.to_string(),
            reason,
        };
        let name = match raw.get("name") {
            Some(Bson::String(name)) => name.as_str(),
            Some(other) => {
                return Err(malformed(format!("index name {other} is not a string")));
            }
            None => return Err(malformed(format!("descriptor {raw} has no name"))),
        };
        let key = match raw.get("key") {
            Some(Bson::Document(key)) => key,
            Some(other) => {
                return Err(malformed(format!(
                    "key of index {name} is {other}, not a document"
                )));
            }
            None => return Err(malformed(format!("index {name} has no key"))),
        };
        Ok(Self { name, key, raw })
    }
}

fn parse_sorted<'a>(raw: &'a [Document], namespace: &str) -> Result<Vec<IndexDescriptor<'a>>> {
    let mut indexes = raw
        .iter()
        .map(|descriptor| IndexDescriptor::parse(descriptor, namespace))
        .collect::<Result<Vec<_>>>()?;
    // Stable, so ties keep listing order.
    indexes.sort_by(|a, b| a.name.cmp(b.name));
    Ok(indexes)
}

/// Walks both name-sorted listings and describes the first index that is
/// missing on one side or defined differently.
fn first_definition_difference(
    source: &[IndexDescriptor<'_>],
    target: &[IndexDescriptor<'_>],
    comparator: &DocumentComparator,
) -> Option<String> {
    let (mut s, mut t) = (0, 0);
    loop {
        match (source.get(s), target.get(t)) {
            (None, None) => return None,
            (Some(index), None) => {
                return Some(format!("Index {} exists only in source", index.name));
            }
            (None, Some(index)) => {
                return Some(format!("Index {} exists only in target", index.name));
            }
            (Some(a), Some(b)) => match a.name.cmp(b.name) {
                Ordering::Less => {
                    return Some(format!("Index {} exists only in source", a.name));
                }
                Ordering::Greater => {
                    return Some(format!("Index {} exists only in target", b.name));
                }
                Ordering::Equal => {
                    if let Some(difference) = comparator.diff(a.raw, b.raw) {
                        return Some(format!(
                            "Index {} definition differs: {difference}",
                            a.name
                        ));
                    }
                    s += 1;
                    t += 1;
                }
            },
        }
    }
}

fn push_listing(diagnostics: &mut Vec<String>, heading: &str, raw: &[Document]) {
    diagnostics.push(heading.to_string());
    diagnostics.extend(raw.iter().map(|descriptor| format!("  {descriptor}")));
}

/// Compares the index definitions of both collections, leaving
/// `ignored_options` out of the comparison.
pub async fn compare_indexes(
    source: &dyn CollectionHandle,
    target: &dyn CollectionHandle,
    ignored_options: &BTreeSet<String>,
) -> Result<CheckResult> {
    let source_raw = source.list_indexes().await?;
    let target_raw = target.list_indexes().await?;
    info!(
        "Comparing {} source indexes with {} target indexes",
        source_raw.len(),
        target_raw.len()
    );

    let source_indexes = parse_sorted(&source_raw, &source.namespace())?;
    let target_indexes = parse_sorted(&target_raw, &target.namespace())?;

    let comparator = DocumentComparator {
        field_order: FieldOrder::Ignore,
        ignored_fields: ignored_options.clone(),
    };

    let mut diagnostics = Vec::new();
    match first_definition_difference(&source_indexes, &target_indexes, &comparator) {
        Some(difference) => diagnostics.push(difference),
        None => {
            let source_keys: BTreeMap<&str, &Document> =
                source_indexes.iter().map(|index| (index.name, index.key)).collect();
            let target_keys: BTreeMap<&str, &Document> =
                target_indexes.iter().map(|index| (index.name, index.key)).collect();
            for (name, source_key) in &source_keys {
                let same_order = target_keys.get(name).is_some_and(|target_key| {
                    documents_equal(source_key, target_key, FieldOrder::Preserve)
                });
                if !same_order {
                    diagnostics.push(format!("Index key comparison failed on {name}"));
                }
            }
        }
    }

    let examined = source_raw.len().max(target_raw.len()) as u64;
    if diagnostics.is_empty() {
        return Ok(CheckResult::pass(CheckKind::Indexes, examined));
    }

    warn!("Index definitions differ: {}", diagnostics[0]);
    push_listing(
        &mut diagnostics,
        "Indexes are not the same. Source indexes:",
        &source_raw,
    );
    push_listing(&mut diagnostics, "Target indexes:", &target_raw);
    Ok(CheckResult::fail(CheckKind::Indexes, examined, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationConfig;
    use crate::memory::MemoryCollection;
    use bson::doc;

    fn defaults() -> BTreeSet<String> {
        ValidationConfig::default().ignored_index_options
    }

    fn with_indexes(name: &str, indexes: Vec<Document>) -> MemoryCollection {
        indexes
            .into_iter()
            .fold(MemoryCollection::new(name), |collection, index| {
                collection.with_index(index)
            })
    }

    #[tokio::test]
    async fn test_identical_indexes_pass() {
        let indexes = vec![
            doc! { "v": 2, "key": { "email": 1 }, "name": "email_1", "unique": true },
            doc! { "v": 2, "key": { "a": 1, "b": -1 }, "name": "a_1_b_-1" },
        ];
        let result = compare_indexes(
            &with_indexes("db.src", indexes.clone()),
            &with_indexes("db.tgt", indexes),
            &defaults(),
        )
        .await
        .unwrap();
        assert!(result.passed, "{:?}", result.diagnostics);
        assert_eq!(result.examined, 3);
    }

    #[tokio::test]
    async fn test_background_option_is_ignored() {
        let source = with_indexes(
            "db.src",
            vec![doc! { "v": 2, "key": { "a": 1 }, "name": "a_1", "background": true }],
        );
        let target = with_indexes(
            "db.tgt",
            vec![doc! { "v": 2, "key": { "a": 1 }, "name": "a_1", "background": false }],
        );
        let result = compare_indexes(&source, &target, &defaults()).await.unwrap();
        assert!(result.passed, "{:?}", result.diagnostics);

        let strict = compare_indexes(&source, &target, &BTreeSet::new())
            .await
            .unwrap();
        assert!(!strict.passed);
    }

    #[tokio::test]
    async fn test_extra_ignored_option() {
        let source = with_indexes(
            "db.src",
            vec![doc! { "v": 2, "key": { "a": 1 }, "name": "a_1", "ns": "old.coll" }],
        );
        let target = with_indexes(
            "db.tgt",
            vec![doc! { "v": 2, "key": { "a": 1 }, "name": "a_1", "ns": "new.coll" }],
        );
        let mut ignored = defaults();
        ignored.insert("ns".to_string());
        assert!(!compare_indexes(&source, &target, &defaults()).await.unwrap().passed);
        assert!(compare_indexes(&source, &target, &ignored).await.unwrap().passed);
    }

    #[tokio::test]
    async fn test_listing_order_does_not_matter() {
        let a = doc! { "v": 2, "key": { "a": 1 }, "name": "a_1" };
        let b = doc! { "v": 2, "key": { "b": 1 }, "name": "b_1" };
        let source = with_indexes("db.src", vec![a.clone(), b.clone()]);
        let target = MemoryCollection::new("db.tgt").with_indexes(vec![
            b,
            doc! { "v": 2, "key": { "_id": 1 }, "name": "_id_" },
            a,
        ]);
        let result = compare_indexes(&source, &target, &defaults()).await.unwrap();
        assert!(result.passed, "{:?}", result.diagnostics);
    }

    #[tokio::test]
    async fn test_reordered_key_fields_fail() {
        let source = with_indexes(
            "db.src",
            vec![doc! { "v": 2, "key": { "a": 1, "b": 1 }, "name": "compound" }],
        );
        let target = with_indexes(
            "db.tgt",
            vec![doc! { "v": 2, "key": { "b": 1, "a": 1 }, "name": "compound" }],
        );
        let result = compare_indexes(&source, &target, &defaults()).await.unwrap();
        assert!(!result.passed);
        assert_eq!(result.diagnostics[0], "Index key comparison failed on compound");
        assert!(result
            .diagnostics
            .contains(&"Indexes are not the same. Source indexes:".to_string()));
        assert!(result.diagnostics.contains(&"Target indexes:".to_string()));
    }

    #[tokio::test]
    async fn test_missing_index_is_named() {
        let source = with_indexes(
            "db.src",
            vec![doc! { "v": 2, "key": { "a": 1 }, "name": "a_1" }],
        );
        let target = MemoryCollection::new("db.tgt");
        let result = compare_indexes(&source, &target, &defaults()).await.unwrap();
        assert!(!result.passed);
        assert_eq!(result.diagnostics[0], "Index a_1 exists only in source");

        let result = compare_indexes(&target, &source, &defaults()).await.unwrap();
        assert_eq!(result.diagnostics[0], "Index a_1 exists only in target");
    }

    #[tokio::test]
    async fn test_changed_option_is_described() {
        let source = with_indexes(
            "db.src",
            vec![doc! { "v": 2, "key": { "email": 1 }, "name": "email_1", "unique": true }],
        );
        let target = with_indexes(
            "db.tgt",
            vec![doc! { "v": 2, "key": { "email": 1 }, "name": "email_1" }],
        );
        let result = compare_indexes(&source, &target, &defaults()).await.unwrap();
        assert!(!result.passed);
        assert_eq!(
            result.diagnostics[0],
            "Index email_1 definition differs: field `unique` is missing in target (source true)"
        );
    }

    #[tokio::test]
    async fn test_malformed_key_is_fatal() {
        let source = with_indexes(
            "db.src",
            vec![doc! { "v": 2, "key": "a", "name": "broken" }],
        );
        let target = MemoryCollection::new("db.tgt");
        let err = compare_indexes(&source, &target, &defaults())
            .await
            .unwrap_err();
        assert!(matches!(err, CompareError::MalformedIndex { .. }));
    }
}
