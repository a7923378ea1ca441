//! Runs every check and aggregates the verdicts.

use crate::checks::{check_counts, compare_ids, compare_indexes, compare_sample_content};
use crate::collection::{CollectionHandle, SortDirection};
use crate::config::ValidationConfig;
use crate::error::Result;
use crate::report::{CheckKind, CheckResult, ValidationReport};
use std::time::Instant;
use tracing::info;

/// Runs the five check invocations in order, one after the other.
///
/// A failing check never stops the ones after it, so a single run surfaces
/// every difference. Errors abort the run: they mean a comparison could not
/// be made at all.
pub async fn run_validation(
    source: &dyn CollectionHandle,
    target: &dyn CollectionHandle,
    config: &ValidationConfig,
) -> Result<ValidationReport> {
    run_validation_with(source, target, config, |_| {}).await
}

/// Like [`run_validation`], calling `on_result` as soon as each check
/// finishes. Results already handed to `on_result` stay with the caller
/// when a later check aborts the run.
pub async fn run_validation_with<F>(
    source: &dyn CollectionHandle,
    target: &dyn CollectionHandle,
    config: &ValidationConfig,
    mut on_result: F,
) -> Result<ValidationReport>
where
    F: FnMut(&CheckResult),
{
    let start = Instant::now();
    let mut report = ValidationReport {
        source: source.namespace(),
        target: target.namespace(),
        ..Default::default()
    };
    info!("Validating {} against {}", report.source, report.target);

    for check in CheckKind::ALL {
        let check_start = Instant::now();
        let result = run_check(check, source, target, config).await?;
        let result = result.with_duration(check_start.elapsed());
        info!(
            "Check of {}: {} ({:?})",
            check,
            if result.passed { "passed" } else { "FAILED" },
            result.duration
        );
        on_result(&result);
        report.results.push(result);
    }

    report.total_duration = start.elapsed();
    info!(
        "Validation finished in {:?} with exit code {}",
        report.total_duration,
        report.exit_code()
    );
    Ok(report)
}

async fn run_check(
    check: CheckKind,
    source: &dyn CollectionHandle,
    target: &dyn CollectionHandle,
    config: &ValidationConfig,
) -> Result<CheckResult> {
    match check {
        CheckKind::Counts => check_counts(source, target).await,
        CheckKind::Indexes => {
            compare_indexes(source, target, &config.ignored_index_options).await
        }
        CheckKind::SampleContent => {
            compare_sample_content(
                source,
                target,
                config.sample_size,
                &config.comparator,
                config.missing_document_policy,
            )
            .await
        }
        CheckKind::FirstIds => {
            compare_ids(source, target, config.first_ids_count, SortDirection::Ascending).await
        }
        CheckKind::LastIds => {
            compare_ids(source, target, config.last_ids_count, SortDirection::Descending).await
        }
    }
}
