//! Sampled content comparison.
//!
//! Draws a server-side random sample from the source and looks each sampled
//! document up in the target by `_id`. Every sampled document must match.

use crate::collection::{document_id, CollectionHandle};
use crate::config::MissingDocumentPolicy;
use crate::error::{CompareError, Result};
use crate::report::{CheckKind, CheckResult};
use crate::value::DocumentComparator;
use bson::doc;
use futures::TryStreamExt;
use tracing::{debug, info, warn};

/// Compares `sample_size` randomly drawn source documents with their target
/// counterparts. A `sample_size` of zero or less disables the check.
pub async fn compare_sample_content(
    source: &dyn CollectionHandle,
    target: &dyn CollectionHandle,
    sample_size: i64,
    comparator: &DocumentComparator,
    missing_policy: MissingDocumentPolicy,
) -> Result<CheckResult> {
    if sample_size <= 0 {
        info!("Sampled content check disabled");
        return Ok(CheckResult::pass(CheckKind::SampleContent, 0));
    }

    let source_namespace = source.namespace();
    let target_namespace = target.namespace();
    let mut sample = source.sample(sample_size).await?;

    let mut sampled = 0u64;
    let mut matches = 0u64;
    let mut diagnostics = Vec::new();

    while let Some(document) = sample.try_next().await? {
        sampled += 1;
        let id = document_id(&document, &source_namespace)?;
        debug!("Looking up sampled _id {} in {}", id, target_namespace);

        let Some(counterpart) = target.find_one(doc! { "_id": id.clone() }).await? else {
            if missing_policy == MissingDocumentPolicy::Fatal {
                return Err(CompareError::MissingDocument {
                    namespace: target_namespace,
                    id: id.clone(),
                });
            }
            warn!("Sampled _id {} not found in target", id);
            diagnostics.push(format!(
                "Target collection is missing document with _id {id}"
            ));
            continue;
        };

        match comparator.diff(&document, &counterpart) {
            None => matches += 1,
            Some(difference) => {
                warn!("Sampled _id {} differs: {}", id, difference);
                diagnostics.push(format!(
                    "Documents with _id {id} do not have equal content: {difference}"
                ));
            }
        }
    }

    info!("{} of {} sampled documents match", matches, sampled);
    // Every sampled document either matched or produced a diagnostic.
    debug_assert_eq!(matches + diagnostics.len() as u64, sampled);
    Ok(CheckResult::from_diagnostics(CheckKind::SampleContent, sampled, diagnostics))
}
