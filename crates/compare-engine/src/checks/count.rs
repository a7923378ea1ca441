//! Exact document count comparison.

use crate::collection::CollectionHandle;
use crate::error::Result;
use crate::report::{CheckKind, CheckResult};
use bson::doc;
use tracing::{info, warn};

/// Compares the total number of documents on each side.
pub async fn check_counts(
    source: &dyn CollectionHandle,
    target: &dyn CollectionHandle,
) -> Result<CheckResult> {
    let source_count = source.count_documents(doc! {}).await?;
    let target_count = target.count_documents(doc! {}).await?;
    info!(
        "Document counts: {} has {}, {} has {}",
        source.namespace(),
        source_count,
        target.namespace(),
        target_count
    );

    if source_count == target_count {
        return Ok(CheckResult::pass(CheckKind::Counts, source_count));
    }

    warn!("Document count mismatch");
    Ok(CheckResult::fail(
        CheckKind::Counts,
        source_count.max(target_count),
        vec![format!(
            "Document counts don't match. Source: {source_count}, Target: {target_count}"
        )],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCollection;

    fn collection(name: &str, size: i32) -> MemoryCollection {
        MemoryCollection::new(name).with_documents((0..size).map(|id| doc! { "_id": id }))
    }

    #[tokio::test]
    async fn test_equal_counts_pass() {
        let result = check_counts(&collection("db.a", 3), &collection("db.b", 3))
            .await
            .unwrap();
        assert!(result.passed);
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.examined, 3);
    }

    #[tokio::test]
    async fn test_mismatch_reports_both_counts() {
        let result = check_counts(&collection("db.a", 7), &collection("db.b", 4))
            .await
            .unwrap();
        assert!(!result.passed);
        assert_eq!(
            result.diagnostics,
            vec!["Document counts don't match. Source: 7, Target: 4".to_string()]
        );
    }

    #[tokio::test]
    async fn test_empty_collections_match() {
        let result = check_counts(&collection("db.a", 0), &collection("db.b", 0))
            .await
            .unwrap();
        assert!(result.passed);
    }
}
