//! Ordered boundary-key comparison.
//!
//! Walks both collections' `_id` values in the same sort order and stops at
//! the first divergence. Run ascending it covers the low end of the key
//! space, descending the high end.

use crate::collection::{document_id, CollectionHandle, FindSpec, SortDirection};
use crate::error::Result;
use crate::report::{CheckKind, CheckResult};
use crate::value::values_equal;
use bson::doc;
use futures::TryStreamExt;
use tracing::{debug, info, warn};

/// Compares the first `count` `_id` values of both collections in
/// `direction` order. A `count` of zero or less disables the check.
pub async fn compare_ids(
    source: &dyn CollectionHandle,
    target: &dyn CollectionHandle,
    count: i64,
    direction: SortDirection,
) -> Result<CheckResult> {
    let check = match direction {
        SortDirection::Ascending => CheckKind::FirstIds,
        SortDirection::Descending => CheckKind::LastIds,
    };
    if count <= 0 {
        info!("Check of {} disabled", check);
        return Ok(CheckResult::pass(check, 0));
    }

    let source_namespace = source.namespace();
    let target_namespace = target.namespace();
    let spec = FindSpec::ids(direction, count);
    // Both cursors are dropped, and their server cursors killed, on every
    // return below.
    let mut source_ids = source.find(doc! {}, spec.clone()).await?;
    let mut target_ids = target.find(doc! {}, spec).await?;

    let mut iteration = 0i64;
    while iteration < count {
        let source_next = source_ids.try_next().await?;
        let target_next = target_ids.try_next().await?;
        let diagnostic = match (&source_next, &target_next) {
            (Some(source_doc), Some(target_doc)) => {
                let source_id = document_id(source_doc, &source_namespace)?;
                let target_id = document_id(target_doc, &target_namespace)?;
                if values_equal(source_id, target_id) {
                    None
                } else {
                    Some(format!(
                        "_id mismatch, iteration {iteration}, sort {}, Source _id: {source_id}, Target _id: {target_id}",
                        direction.as_i32()
                    ))
                }
            }
            (Some(source_doc), None) => Some(format!(
                "Target collection is missing _id {} (end), iteration {iteration}",
                document_id(source_doc, &source_namespace)?
            )),
            (None, Some(target_doc)) => Some(format!(
                "Source collection is missing _id {} (end), iteration {iteration}",
                document_id(target_doc, &target_namespace)?
            )),
            (None, None) => {
                debug!("Both collections ended after {} _id values", iteration);
                break;
            }
        };

        if let Some(diagnostic) = diagnostic {
            warn!("{} diverge: {}", check, diagnostic);
            return Ok(CheckResult::fail(check, iteration as u64 + 1, vec![diagnostic]));
        }
        iteration += 1;
    }

    info!("{} {} _id values match", iteration, check);
    Ok(CheckResult::pass(check, iteration as u64))
}
