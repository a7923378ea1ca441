//! Parameters of a validation run.

use crate::value::DocumentComparator;
use std::collections::BTreeSet;

pub const DEFAULT_SAMPLE_SIZE: i64 = 100;
pub const DEFAULT_FIRST_IDS_COUNT: i64 = 100;
pub const DEFAULT_LAST_IDS_COUNT: i64 = 100;

/// Index options that are build-time hints and carry no identity.
pub const DEFAULT_IGNORED_INDEX_OPTIONS: &[&str] = &["background"];

/// What to do when a sampled source document has no target counterpart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingDocumentPolicy {
    /// Count it as a content mismatch and keep going.
    #[default]
    Mismatch,
    /// Abort the run with [`CompareError::MissingDocument`](crate::CompareError::MissingDocument).
    Fatal,
}

/// Everything the coordinator needs besides the two collections. Built once
/// and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Documents drawn for the content check; `<= 0` disables it.
    pub sample_size: i64,
    /// Leading `_id` values compared in ascending order; `<= 0` disables it.
    pub first_ids_count: i64,
    /// Trailing `_id` values compared in descending order; `<= 0` disables it.
    pub last_ids_count: i64,
    pub ignored_index_options: BTreeSet<String>,
    pub comparator: DocumentComparator,
    pub missing_document_policy: MissingDocumentPolicy,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            first_ids_count: DEFAULT_FIRST_IDS_COUNT,
            last_ids_count: DEFAULT_LAST_IDS_COUNT,
            ignored_index_options: DEFAULT_IGNORED_INDEX_OPTIONS
                .iter()
                .map(|option| option.to_string())
                .collect(),
            comparator: DocumentComparator::default(),
            missing_document_policy: MissingDocumentPolicy::default(),
        }
    }
}
