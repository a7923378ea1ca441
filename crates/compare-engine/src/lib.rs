//! Validation engine for mongocompare.
//!
//! Decides whether a target MongoDB collection is an equivalent copy of a
//! source collection without comparing every document. Five read-only check
//! invocations each produce a [`CheckResult`]:
//!
//! | Check | Bit | What it compares |
//! |-------|-----|------------------|
//! | counts | 1 | exact document counts |
//! | indexes | 2 | index definitions, key order included |
//! | sample content | 4 | a random sample of documents, looked up by `_id` |
//! | first ids | 8 | the lowest `_id` values, ascending |
//! | last ids | 16 | the highest `_id` values, descending |
//!
//! [`run_validation`] runs all of them and returns a [`ValidationReport`]
//! whose [`exit_code`](ValidationReport::exit_code) is the sum of the bits
//! of the failed checks.
//!
//! # Example
//!
//! ```ignore
//! use mongocompare_engine::{run_validation, MongoCollection, ValidationConfig};
//!
//! let source = MongoCollection::new(source_client.database("shop"), "orders");
//! let target = MongoCollection::new(target_client.database("shop"), "orders");
//! let report = run_validation(&source, &target, &ValidationConfig::default()).await?;
//! std::process::exit(report.exit_code());
//! ```

pub mod checks;
pub mod collection;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod memory;
pub mod report;
pub mod value;

pub use checks::{check_counts, compare_ids, compare_indexes, compare_sample_content};
pub use collection::{
    CollectionHandle, DocumentStream, FindSpec, MongoCollection, SortDirection,
};
pub use config::{MissingDocumentPolicy, ValidationConfig};
pub use coordinator::{run_validation, run_validation_with};
pub use error::CompareError;
pub use memory::MemoryCollection;
pub use report::{CheckKind, CheckResult, ValidationReport, FATAL_EXIT_CODE};
pub use value::{values_equal, DocumentComparator, FieldDifference, FieldOrder};
